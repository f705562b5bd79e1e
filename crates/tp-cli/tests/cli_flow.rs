//! End-to-end tests running the `tp` binary against snapshot files.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const LISBON: &str = r#"{
    "trip": {
        "id": "lisbon-2025",
        "destination": "Lisbon",
        "startDate": {"seconds": 1741132800, "nanoseconds": 0},
        "endDate": "2025-03-07",
        "travelers": [{"name": "Ana"}, {"name": "Rui", "relationship": "partner"}],
        "budget": {"total": 1000, "currency": "EUR"},
        "itinerary": [
            {
                "dayNumber": 1,
                "date": "2025-03-05",
                "activities": [
                    {"id": "m", "name": "City Museum", "type": "museum", "startTime": "10:00", "duration": 120},
                    {"id": "c", "name": "Riverside Cafe", "type": "dining", "startTime": "11:30", "duration": 60}
                ],
                "accommodations": [{"name": "Alfama Guesthouse", "cost": {"amount": 150}}]
            },
            {
                "dayNumber": 2,
                "date": "2025-03-06",
                "activities": [
                    {"id": "h", "name": "Sintra Ridge", "type": "hiking", "startTime": "09:00", "duration": 180,
                     "cost": {"amount": 25, "currency": "EUR", "perPerson": true}}
                ],
                "accommodations": [{"name": "Alfama Guesthouse", "cost": {"amount": 150}}]
            }
        ]
    },
    "weather": [
        {"temperature": 19, "precipitation": 5, "windSpeed": 10, "condition": "Sunny"},
        {"temperature": 14, "precipitation": 85, "windSpeed": 20, "condition": "Heavy rain"}
    ]
}"#;

fn tp_binary() -> String {
    env!("CARGO_BIN_EXE_tp").to_string()
}

/// Runs `tp` with an isolated home directory and no `TP_` overrides.
fn tp(home: &Path, args: &[&str]) -> Output {
    Command::new(tp_binary())
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run tp")
}

fn write_snapshot(temp: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, json).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "tp should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_analyze_prints_brief() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(&temp, "lisbon.json", LISBON);

    let output = tp(
        temp.path(),
        &["analyze", path.to_str().unwrap(), "--now", "2025-03-01T09:00:00Z"],
    );
    let brief = stdout(&output);

    assert!(brief.starts_with("TRIP: Lisbon\n"));
    assert!(brief.contains("Dates: Mar 5 \u{2013} Mar 7, 2025 (3 days)"));
    assert!(brief.contains("Travelers: 2 (couple)"));
    assert!(brief.contains("Budget: 350.00 of 1000.00 EUR planned, 650.00 left"));
    assert!(brief.contains("Empty days: 3"));
    assert!(brief.contains("  09:00-12:00 Sintra Ridge (hiking) [weather risk]"));
    assert!(brief.contains("  - [high] Day 1: \"City Museum\" overlaps with \"Riverside Cafe\""));
    assert!(!brief.contains("Warnings:"));
}

#[test]
fn test_analyze_json_matches_issues_json() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(&temp, "lisbon.json", LISBON);
    let file = path.to_str().unwrap();

    let analysis: serde_json::Value = serde_json::from_str(&stdout(&tp(
        temp.path(),
        &["analyze", file, "--json", "--now", "2025-03-01"],
    )))
    .unwrap();
    let issues: serde_json::Value = serde_json::from_str(&stdout(&tp(
        temp.path(),
        &["issues", file, "--json", "--now", "2025-03-01"],
    )))
    .unwrap();

    assert_eq!(analysis["context"]["issues"], issues);

    let types: Vec<&str> = issues
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, ["time_conflict", "time_conflict", "meal_gap"]);

    let day = &analysis["context"]["detailedItinerary"][0];
    assert_eq!(day["freeTimeSlots"][0]["start"], "08:00");
    assert_eq!(day["freeTimeSlots"][0]["duration"], 120);
    assert_eq!(analysis["context"]["budget"]["spent"], 350.0);
    assert_eq!(analysis["context"]["progress"]["emptyDays"], serde_json::json!([3]));
}

#[test]
fn test_same_snapshot_same_output() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(&temp, "lisbon.json", LISBON);
    let args = ["analyze", path.to_str().unwrap(), "--json", "--now", "2025-03-06T12:00:00Z"];

    let first = stdout(&tp(temp.path(), &args));
    let second = stdout(&tp(temp.path(), &args));
    assert_eq!(first, second);
}

#[test]
fn test_config_file_changes_thresholds() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(&temp, "lisbon.json", LISBON);
    let config = temp.path().join("tp.toml");
    std::fs::write(&config, "[analysis]\nmax_precipitation = 90.0\n").unwrap();

    let output = tp(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "analyze",
            path.to_str().unwrap(),
            "--now",
            "2025-03-01",
        ],
    );
    let brief = stdout(&output);
    assert!(brief.contains("  09:00-12:00 Sintra Ridge (hiking)\n"));
}

#[test]
fn test_env_overrides_config() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(&temp, "lisbon.json", LISBON);

    let output = Command::new(tp_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("TP_ANALYSIS__PACKED_DAY_THRESHOLD", "1")
        .args(["analyze", path.to_str().unwrap(), "--now", "2025-03-01"])
        .output()
        .unwrap();
    assert!(stdout(&output).contains("Packed days: 1"));
}

#[test]
fn test_batch_reports_every_file() {
    let temp = TempDir::new().unwrap();
    let good = write_snapshot(&temp, "lisbon.json", LISBON);
    let bad = write_snapshot(&temp, "broken.json", "{");

    let output = tp(
        temp.path(),
        &[
            "batch",
            good.to_str().unwrap(),
            bad.to_str().unwrap(),
            "--now",
            "2025-03-01",
        ],
    );
    assert!(!output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("Lisbon: 3 issues (2 high), spent 350.00 of 1000.00 EUR"));
    assert!(lines[1].contains("broken.json\terror:"));
}

#[test]
fn test_missing_file_fails_with_path() {
    let temp = TempDir::new().unwrap();
    let output = tp(temp.path(), &["analyze", "/nonexistent/trip.json"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/trip.json"));
}

#[test]
fn test_invalid_now_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_snapshot(&temp, "lisbon.json", LISBON);
    let output = tp(
        temp.path(),
        &["analyze", path.to_str().unwrap(), "--now", "someday"],
    );

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid datetime"));
}
