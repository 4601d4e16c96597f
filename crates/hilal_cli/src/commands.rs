use std::io;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use hilal_ephem::{NightUnavailable, crescent_geometry};
use hilal_rs::{FirstDay, HilalChecker, LunarEpochResolver, PredictionRow};
use serde_json::json;
use tracing::info;

use crate::cli::MonthArgs;
use crate::config::HilalConfig;

/// Output layout for the yearly table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Text,
    Json,
    Csv,
}

/// Unix epoch as a Julian Date.
const JD_UNIX_EPOCH: f64 = 2_440_587.5;

fn jd_to_utc(jd_ut: f64) -> Option<DateTime<Utc>> {
    let secs = ((jd_ut - JD_UNIX_EPOCH) * 86_400.0).round();
    DateTime::from_timestamp(secs as i64, 0)
}

fn fmt_jd(jd_ut: f64) -> String {
    jd_to_utc(jd_ut)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("JD {jd_ut:.5}"))
}

fn load_checker(config: &HilalConfig) -> Result<HilalChecker> {
    let settings = config.checker_settings()?;
    info!(model = %config.model.display(), "loading visibility model");
    HilalChecker::from_model_path_with(&config.model, settings)
        .with_context(|| format!("failed to load model: {}", config.model.display()))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn anchor(month: &MonthArgs, json: bool) -> Result<()> {
    let date = LunarEpochResolver::default().anchor(month.year, &month.month)?;
    if json {
        print_json(&json!({
            "hijri_year": month.year,
            "month": month.month,
            "anchor": date,
        }))
    } else {
        println!("{} {}: {date} (tabular)", month.month, month.year);
        Ok(())
    }
}

pub fn features(date: NaiveDate, config: &HilalConfig, json: bool) -> Result<()> {
    let site = config.site()?;
    let geometry = crescent_geometry(date, &site);

    if json {
        return match geometry {
            Ok(g) => print_json(&json!({
                "date": date,
                "site": site,
                "available": true,
                "geometry": g,
            })),
            Err(reason) => print_json(&json!({
                "date": date,
                "site": site,
                "available": false,
                "reason": reason.to_string(),
            })),
        };
    }

    println!(
        "Evening of {date} at {:.4}, {:.4} ({:.0} m)",
        site.latitude_deg, site.longitude_deg, site.elevation_m
    );
    match geometry {
        Ok(g) => {
            println!("  Sunset:    {}", fmt_jd(g.sunset_jd));
            println!("  Moonset:   {}", fmt_jd(g.moonset_jd));
            println!("  Best time: {}", fmt_jd(g.best_time_jd));
            println!("  Lag:       {:.1} min", g.lag_minutes);
            println!(
                "  ARCV: {:.4} deg  ARCL: {:.4} deg  DAZ: {:.4} deg",
                g.arcv_deg, g.arcl_deg, g.daz_deg
            );
            println!(
                "  Moon alt: {:.4} deg  Sun alt: {:.4} deg",
                g.moon_altitude_deg, g.sun_altitude_deg
            );
            println!("  W (topocentric): {:.6} deg", g.w_topo_deg);
        }
        Err(reason) => println!("  {}", unavailable_message(reason)),
    }
    Ok(())
}

fn unavailable_message(reason: NightUnavailable) -> String {
    format!("No crescent parameters: {reason}")
}

fn print_first_day(label: &str, day: &FirstDay) {
    println!(
        "{label}: {}-{:02}-{:02} (p = {:.4})",
        day.year, day.month, day.day, day.probability
    );
}

pub fn first_day(
    month: &MonthArgs,
    threshold: Option<f64>,
    config: &HilalConfig,
    json: bool,
) -> Result<()> {
    let checker = load_checker(config)?;
    let threshold = threshold.unwrap_or(checker.tiers().high);
    let day = checker.determine_first_day_with_threshold(month.year, &month.month, threshold)?;

    if json {
        print_json(&json!({
            "hijri_year": month.year,
            "month": month.month,
            "threshold": threshold,
            "first_day": day,
        }))
    } else {
        print_first_day(&format!("1 {} {}", month.month, month.year), &day);
        Ok(())
    }
}

pub fn bracket(month: &MonthArgs, config: &HilalConfig, json: bool) -> Result<()> {
    let checker = load_checker(config)?;
    let tiers = *checker.tiers();
    let b = checker.determine_first_day_with_bracket(month.year, &month.month)?;

    if json {
        return print_json(&json!({
            "hijri_year": month.year,
            "month": month.month,
            "tiers": tiers,
            "result": b,
        }));
    }

    print_first_day(&format!("1 {} {} @ {}", month.month, month.year, tiers.low), &b.primary);
    match b.fallback {
        Some(f) => print_first_day(&format!("  fallback @ {}", tiers.high), &f),
        None => println!("  no fallback needed"),
    }
    Ok(())
}

pub fn year(hijri_year: i32, config: &HilalConfig, format: TableFormat) -> Result<()> {
    let checker = load_checker(config)?;
    let rows = checker.generate_predictions_for_year(hijri_year)?;

    match format {
        TableFormat::Json => print_json(&json!({
            "hijri_year": hijri_year,
            "rows": rows,
        })),
        TableFormat::Csv => write_csv(&rows, io::stdout()),
        TableFormat::Text => {
            println!("Hijri year {hijri_year}");
            println!("{:<14} {:<10} Confidence", "Month", "Date");
            for row in &rows {
                println!(
                    "{:<14} {:<10} {}",
                    row.month_name, row.date, row.confidence_or_message
                );
            }
            Ok(())
        }
    }
}

fn write_csv<W: io::Write>(rows: &[PredictionRow], out: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row).context("failed to write CSV row")?;
    }
    wtr.flush()?;
    Ok(())
}
