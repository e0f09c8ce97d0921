//! CLI E2E tests for the sort-trace binary.
//!
//! Validates:
//! - `run` emits a trace file on stdout or to `--out`
//! - `verify` accepts untouched traces and rejects tampered ones
//! - `scenario` / `scenarios` expose the built-in inputs
//! - Error paths map to their exit codes

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

// ============================================================================
// Helpers
// ============================================================================

/// Get a Command for the sort-trace binary isolated from user config.
fn sort_trace() -> Command {
    let mut cmd = cargo_bin_cmd!("sort-trace");
    cmd.timeout(Duration::from_secs(60))
        .env_remove("SORT_TRACE_CONFIG")
        .env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", "/nonexistent/sort-trace-test");
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("parse JSON")
}

// ============================================================================
// run
// ============================================================================

#[test]
fn test_run_prints_trace_file() {
    let json = stdout_json(sort_trace().args(["run", "-a", "bubble", "-i", "3,1,2"]));

    assert_eq!(json["algorithm"], "bubble");
    assert_eq!(json["sorted"], serde_json::json!([1, 2, 3]));
    assert_eq!(json["schema_version"], "1.0.0");
    assert!(json["run_id"].as_str().unwrap().starts_with("run-"));
    assert_eq!(json["digest"].as_str().unwrap().len(), 64);

    let events = json["events"].as_array().expect("events array");
    assert_eq!(events[0]["kind"], "data");
    assert_eq!(events[0]["values"], serde_json::json!([3, 1, 2]));
}

#[test]
fn test_run_summary() {
    sort_trace()
        .args(["run", "-a", "merge", "-i", "4,3,2,1", "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sorted:    [1, 2, 3, 4]"))
        .stdout(predicate::str::contains("copy"));
}

#[test]
fn test_run_negative_values() {
    let json = stdout_json(sort_trace().args(["run", "-a", "quick", "-i", "-3,5,-7"]));
    assert_eq!(json["sorted"], serde_json::json!([-7, -3, 5]));
}

#[test]
fn test_unknown_algorithm_exit_code() {
    sort_trace()
        .args(["run", "-a", "bogo", "-i", "1,2"])
        .assert()
        .code(12)
        .stderr(predicate::str::contains("unknown algorithm: bogo"));
}

#[test]
fn test_counting_requires_max_value() {
    sort_trace()
        .args(["run", "-a", "counting", "-i", "1,2"])
        .assert()
        .code(11);
}

#[test]
fn test_counting_rejects_out_of_range_value() {
    sort_trace()
        .args(["run", "-a", "counting", "-i", "5,12,3", "--max-value", "10"])
        .assert()
        .code(11);
}

#[test]
fn test_bad_input_value() {
    sort_trace()
        .args(["run", "-a", "bubble", "-i", "1,two"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("two"));
}

#[test]
fn test_missing_subcommand_is_usage_error() {
    sort_trace().assert().code(2);
    sort_trace().args(["run", "-a", "bubble"]).assert().code(2);
}

#[test]
fn test_help_exits_cleanly() {
    sort_trace()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("verify"));
}

// ============================================================================
// verify
// ============================================================================

#[test]
fn test_run_out_then_verify() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("trace.json");
    let path_str = path.to_str().unwrap();

    sort_trace()
        .args(["run", "-a", "counting", "-i", "8,1,0,5,6,3,2,4,7,1"])
        .args(["--max-value", "10", "--out", path_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("algorithm: counting"));
    assert!(path.exists());

    sort_trace()
        .args(["verify", path_str])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok: run-"));
}

#[test]
fn test_verify_detects_tampering() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("trace.json");
    let path_str = path.to_str().unwrap();

    sort_trace()
        .args(["run", "-a", "insertion", "-i", "2,1", "--out", path_str])
        .assert()
        .success();

    let mut json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    json["events"][0]["values"][0] = serde_json::json!(9);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    sort_trace()
        .args(["verify", path_str])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("digest mismatch"));
}

#[test]
fn test_verify_detects_edited_header() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("trace.json");
    let path_str = path.to_str().unwrap();

    sort_trace()
        .args(["run", "-a", "counting", "-i", "2,1", "--max-value", "2"])
        .args(["--out", path_str])
        .assert()
        .success();
    let original = fs::read_to_string(&path).unwrap();

    for (field, value) in [
        ("input", serde_json::json!([2, 9])),
        ("sorted", serde_json::json!([2, 1])),
        ("max_value", serde_json::json!(1)),
    ] {
        let mut json: Value = serde_json::from_str(&original).unwrap();
        json[field] = value;
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        sort_trace()
            .args(["verify", path_str])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("digest mismatch"));
    }
}

#[test]
fn test_verify_missing_file() {
    sort_trace()
        .args(["verify", "/nonexistent/trace.json"])
        .assert()
        .code(13);
}

// ============================================================================
// scenarios, schema, config
// ============================================================================

#[test]
fn test_scenarios_listing() {
    sort_trace()
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("bubble_demo"))
        .stdout(predicate::str::contains("counting_demo"))
        .stdout(predicate::str::contains("single"));
}

#[test]
fn test_scenarios_json_listing() {
    let json = stdout_json(sort_trace().args(["scenarios", "--json"]));
    let list = json.as_array().expect("array");
    assert_eq!(list.len(), 8);
    assert_eq!(list[2]["name"], "counting_demo");
    assert_eq!(list[2]["max_value"], 10);
    assert!(list[0].get("max_value").is_none());
}

#[test]
fn test_scenario_with_algorithm_override() {
    let json = stdout_json(sort_trace().args(["scenario", "bubble_demo", "-a", "counting"]));
    assert_eq!(json["algorithm"], "counting");
    assert_eq!(
        json["sorted"],
        serde_json::json!([11, 12, 22, 25, 34, 64, 90])
    );
}

#[test]
fn test_unknown_scenario() {
    sort_trace()
        .args(["scenario", "nope"])
        .assert()
        .code(11)
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn test_schema_describes_trace_file() {
    let json = stdout_json(sort_trace().arg("schema"));
    let properties = json["properties"].as_object().expect("properties");
    for field in ["run_id", "algorithm", "digest", "events", "sorted"] {
        assert!(properties.contains_key(field), "schema lacks {field}");
    }
}

#[test]
fn test_detailed_preset_adds_count_snapshots() {
    let count_snapshots = |preset: &str| {
        let json = stdout_json(sort_trace().args([
            "--preset",
            preset,
            "run",
            "-a",
            "counting",
            "-i",
            "2,0,1",
            "--max-value",
            "3",
        ]));
        json["events"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|e| e["kind"] == "temp_data")
            .count()
    };
    assert_eq!(count_snapshots("default"), 3);
    assert_eq!(count_snapshots("detailed"), 6);
}

#[test]
fn test_invalid_log_filter_exit_code() {
    sort_trace()
        .env("RUST_LOG", "sort_trace=loud")
        .arg("scenarios")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("invalid log filter"));
}

#[test]
fn test_invalid_config_exit_code() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, "{not json").unwrap();

    sort_trace()
        .args(["--config", path.to_str().unwrap(), "scenarios"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("configuration error"));
}
