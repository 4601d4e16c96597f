mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::HilalConfig;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config =
        HilalConfig::load(cli.config.as_deref())?.with_overrides(cli.model, cli.lat, cli.lon);
    let json = cli.json;

    match cli.command {
        Command::Anchor(month) => commands::anchor(&month, json),
        Command::Features { date } => commands::features(date, &config, json),
        Command::FirstDay { month, threshold } => {
            commands::first_day(&month, threshold, &config, json)
        }
        Command::Bracket(month) => commands::bracket(&month, &config, json),
        Command::Year { year, csv } => {
            let format = if csv {
                commands::TableFormat::Csv
            } else if json {
                commands::TableFormat::Json
            } else {
                commands::TableFormat::Text
            };
            commands::year(year, &config, format)
        }
    }
}
