//! Runs the `hilal` binary end to end.

use std::path::PathBuf;
use std::process::{Command, Output};

fn model_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models/hilal_visibility_v1.json")
}

fn hilal(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hilal"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run hilal")
}

fn hilal_with_model(args: &[&str]) -> Option<Output> {
    let model = model_path();
    if !model.exists() {
        eprintln!("Skipping: model artifact not found");
        return None;
    }
    let model = model.to_string_lossy().into_owned();
    let mut full = vec!["--model", model.as_str()];
    full.extend_from_slice(args);
    Some(hilal(&full))
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

#[test]
fn anchor_prints_tabular_date() {
    let o = hilal(&["anchor", "1444", "Ramadan"]);
    assert!(o.status.success());
    assert!(stdout(&o).contains("2023-03-23"));
}

#[test]
fn anchor_json() {
    let o = hilal(&["--json", "anchor", "1445", "Muharram"]);
    assert!(o.status.success());
    let v: serde_json::Value = serde_json::from_slice(&o.stdout).unwrap();
    assert_eq!(v["anchor"], "2023-07-19");
}

#[test]
fn invalid_month_exits_with_error() {
    let o = hilal(&["anchor", "1444", "Ramadhan"]);
    assert_eq!(o.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&o.stderr).contains("Error:"));
}

#[test]
fn missing_model_exits_with_error() {
    let o = hilal(&["--model", "/nonexistent/model.json", "first-day", "1444", "Ramadan"]);
    assert_eq!(o.status.code(), Some(1));
}

#[test]
fn features_unavailable_before_new_moon() {
    let o = hilal(&["--json", "features", "2023-03-21"]);
    assert!(o.status.success());
    let v: serde_json::Value = serde_json::from_slice(&o.stdout).unwrap();
    assert_eq!(v["available"], false);
}

#[test]
fn features_after_new_moon() {
    let o = hilal(&["--json", "features", "2023-03-22"]);
    assert!(o.status.success());
    let v: serde_json::Value = serde_json::from_slice(&o.stdout).unwrap();
    assert_eq!(v["available"], true);
    assert!(v["geometry"]["arcv_deg"].as_f64().unwrap() > 11.0);
}

#[test]
fn first_day_ramadan_1444() {
    let Some(o) = hilal_with_model(&["first-day", "1444", "Ramadan"]) else {
        return;
    };
    assert!(o.status.success(), "{}", String::from_utf8_lossy(&o.stderr));
    assert!(stdout(&o).contains("2023-03-23"));
}

#[test]
fn first_day_rejects_bad_threshold() {
    let Some(o) = hilal_with_model(&["first-day", "1444", "Ramadan", "--threshold", "1.5"]) else {
        return;
    };
    assert_eq!(o.status.code(), Some(1));
}

#[test]
fn year_csv_has_twelve_rows() {
    let Some(o) = hilal_with_model(&["year", "1445", "--csv"]) else {
        return;
    };
    assert!(o.status.success());
    let text = stdout(&o);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 13);
    assert_eq!(lines[0], "month_name,date,confidence_or_message");
    assert!(lines[1].starts_with("Muharram,"));
}

#[test]
fn year_out_of_range_fails() {
    let Some(o) = hilal_with_model(&["year", "1700"]) else {
        return;
    };
    assert_eq!(o.status.code(), Some(1));
}

#[test]
fn config_file_site_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hilal.toml");
    std::fs::write(&path, "[site]\nlatitude_deg = 21.4225\nlongitude_deg = 39.8262\n").unwrap();
    let o = hilal(&["--json", "-c", path.to_str().unwrap(), "features", "2023-03-22"]);
    assert!(o.status.success());
    let v: serde_json::Value = serde_json::from_slice(&o.stdout).unwrap();
    assert_eq!(v["site"]["longitude_deg"], 39.8262);
}
