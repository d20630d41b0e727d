//! Integration tests for the `slotgrid` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to drive the layout and summary
//! subcommands through the real binary, covering file and stdin input, config
//! files with flag overrides, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

fn week_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/week.json")
}

fn config_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/config.json")
}

fn week_json() -> String {
    std::fs::read_to_string(week_json_path()).expect("week.json fixture must exist")
}

fn layout_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("slotgrid")
        .unwrap()
        .args(args)
        .output()
        .expect("slotgrid must run");
    assert!(output.status.success(), "slotgrid failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("layout output must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn layout_single_day_from_file() {
    let days = layout_json(&[
        "layout",
        "-i",
        week_json_path(),
        "--from",
        "2026-03-16",
        "--start-hour",
        "9",
        "--end-hour",
        "17",
    ]);

    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], "2026-03-16");

    let slots = days[0]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 16);
    assert_eq!(slots[2]["kind"], "available");
    assert_eq!(slots[15]["offsetMinutes"], 900);
}

#[test]
fn layout_reads_stdin() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args(["layout", "--from", "2026-03-17"])
        .write_stdin(week_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outOfOffice\""))
        .stdout(predicate::str::contains("\"Conference\""));
}

#[test]
fn layout_week_with_config_file() {
    let days = layout_json(&[
        "layout",
        "-i",
        week_json_path(),
        "--from",
        "2026-03-16",
        "--to",
        "2026-03-22",
        "--config",
        config_json_path(),
    ]);

    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 7);
    // Fully away without a substitute: blank day.
    assert_eq!(days[2]["slots"].as_array().unwrap().len(), 0);
    // Empty days fill the 09:00-17:00 window hour by hour.
    assert_eq!(days[6]["slots"].as_array().unwrap().len(), 8);
}

#[test]
fn flags_override_config_file() {
    let days = layout_json(&[
        "layout",
        "-i",
        week_json_path(),
        "--from",
        "2026-03-17",
        "--config",
        config_json_path(),
        "--no-ooo-merge",
    ]);

    let slots = days[0]["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 8);
    assert!(slots.iter().all(|s| s["kind"] == "unavailable"));
}

#[test]
fn layout_writes_output_file() {
    let output_path = "/tmp/slotgrid-test-layout-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "layout",
            "-i",
            week_json_path(),
            "--from",
            "2026-03-16",
            "-o",
            output_path,
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value[0]["date"], "2026-03-16");

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn file_and_stdout_output_are_identical() {
    let output_path = "/tmp/slotgrid-test-layout-newline.json";
    let _ = std::fs::remove_file(output_path);
    let args = ["layout", "-i", week_json_path(), "--from", "2026-03-16"];

    Command::cargo_bin("slotgrid")
        .unwrap()
        .args(args)
        .args(["-o", output_path])
        .assert()
        .success();
    let stdout = Command::cargo_bin("slotgrid")
        .unwrap()
        .args(args)
        .output()
        .expect("slotgrid must run")
        .stdout;

    let file = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(file.ends_with("]\n"));
    assert!(!file.ends_with("\n\n"));
    assert_eq!(file.as_bytes(), stdout.as_slice());

    let _ = std::fs::remove_file(output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn summary_prints_counts_per_day() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "summary",
            "-i",
            week_json_path(),
            "--from",
            "2026-03-16",
            "--to",
            "2026-03-17",
            "--end-hour",
            "17",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-16  available:   1  unavailable:  15"))
        .stdout(predicate::str::contains("out-of-office: 1"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn degenerate_window_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "layout",
            "-i",
            week_json_path(),
            "--from",
            "2026-03-16",
            "--start-hour",
            "17",
            "--end-hour",
            "9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid grid settings"));
}

#[test]
fn unknown_timezone_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "layout",
            "-i",
            week_json_path(),
            "--from",
            "2026-03-16",
            "--tz",
            "Atlantis/Capital",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Atlantis/Capital"));
}

#[test]
fn inverted_range_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args([
            "layout",
            "-i",
            week_json_path(),
            "--from",
            "2026-03-20",
            "--to",
            "2026-03-16",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date range"));
}

#[test]
fn malformed_availability_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args(["layout", "--from", "2026-03-16"])
        .write_stdin("not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse availability JSON"));
}

#[test]
fn missing_input_file_fails() {
    Command::cargo_bin("slotgrid")
        .unwrap()
        .args(["layout", "-i", "/nonexistent/week.json", "--from", "2026-03-16"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
