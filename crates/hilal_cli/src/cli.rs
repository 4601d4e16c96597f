use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Crescent-based Hijri month start determination.
#[derive(Parser)]
#[command(name = "hilal", version, about = "Hijri month starts from crescent visibility")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the model artifact path from config.
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    /// Override site latitude (degrees, north positive).
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Override site longitude (degrees, east positive).
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Arithmetic (tabular) Gregorian date of day 1 of a Hijri month.
    Anchor(MonthArgs),
    /// Crescent geometry for the evening of a Gregorian date.
    Features {
        /// Civil date (YYYY-MM-DD) whose evening is observed.
        date: NaiveDate,
    },
    /// First day of a Hijri month from crescent visibility.
    FirstDay {
        #[command(flatten)]
        month: MonthArgs,
        /// Confidence threshold in [0, 1] (default: high tier).
        #[arg(long)]
        threshold: Option<f64>,
    },
    /// First day at the low tier, with a high-tier fallback when ambiguous.
    Bracket(MonthArgs),
    /// Predictions for all twelve months of a Hijri year.
    Year {
        /// Hijri year.
        year: i32,
        /// Write the table as CSV (takes precedence over --json).
        #[arg(long)]
        csv: bool,
    },
}

/// A Hijri year and canonical month name.
#[derive(clap::Args)]
pub struct MonthArgs {
    /// Hijri year (1300..=1600).
    pub year: i32,
    /// Canonical month name, e.g. "Ramadan" or "Dhu al-Hijjah".
    pub month: String,
}
