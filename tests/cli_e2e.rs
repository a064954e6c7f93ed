//! End-to-end CLI tests for chatsift.
//!
//! These tests run the actual binary against fixture transcripts and check
//! the files it writes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// ============================================================================
// Helpers
// ============================================================================

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// The binary, run inside a fresh temporary directory.
fn chatsift() -> (Command, TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cmd = Command::from_std(std::process::Command::new(env!("CARGO_BIN_EXE_chatsift")));
    cmd.current_dir(dir.path());
    (cmd, dir)
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_default_outputs_json_and_csv() {
    let (mut cmd, dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 6 messages"))
        .stdout(predicate::str::contains("Dropped 2 placeholder messages"));

    let json = read_json(&dir.path().join("chat_output.json"));
    let messages = json.as_array().unwrap();
    assert_eq!(messages.len(), 6);
    assert_eq!(messages[0]["sender"], "+91 93612 07532");
    assert_eq!(messages[0]["date"], "2025-01-22");
    assert_eq!(messages[0]["time"], "11:59:00");
    assert!(messages[0].get("annotations").is_none());

    let csv = fs::read_to_string(dir.path().join("chat_output.csv")).unwrap();
    assert!(csv.starts_with("Date,Time,Sender,Body\n"));
    assert!(csv.contains("Meeting at 10:00: confirmed"));
}

#[test]
fn test_custom_stem_and_formats() {
    let (mut cmd, dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .args(["-o", "team", "-f", "jsonl"])
        .assert()
        .success();

    assert!(!dir.path().join("team.json").exists());
    let jsonl = fs::read_to_string(dir.path().join("team.jsonl")).unwrap();
    assert_eq!(jsonl.lines().count(), 6);
}

#[test]
fn test_columns_and_delimiter() {
    let (mut cmd, dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .args(["-f", "csv", "--columns", "timestamp,sender", "--delimiter", ";"])
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("chat_output.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("Timestamp;Sender"));
    assert_eq!(lines.next(), Some("2025-01-22 11:59:00;+91 93612 07532"));
}

#[test]
fn test_keep_placeholders_flag() {
    let (mut cmd, dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .args(["-f", "json", "--keep-placeholders"])
        .assert()
        .success();

    let json = read_json(&dir.path().join("chat_output.json"));
    assert_eq!(json.as_array().unwrap().len(), 8);
    assert_eq!(json[2]["body"], "<Media omitted>");
}

#[test]
fn test_keywords_flag() {
    let (mut cmd, dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .args(["--keywords", "--max-keywords", "2"])
        .assert()
        .success();

    let json = read_json(&dir.path().join("chat_output.json"));
    assert_eq!(json[0]["annotations"], serde_json::json!(["unable", "edit"]));

    let csv = fs::read_to_string(dir.path().join("chat_output.csv")).unwrap();
    assert!(csv.starts_with("Date,Time,Sender,Body,Annotations\n"));
}

#[test]
fn test_config_file() {
    let (mut cmd, dir) = chatsift();
    let config = dir.path().join("chatsift.toml");
    fs::write(&config, "[output]\ncsv_columns = [\"sender\", \"body\"]\n").unwrap();

    cmd.arg(fixture("group_chat.txt"))
        .args(["-f", "csv", "--config"])
        .arg(&config)
        .assert()
        .success();

    let csv = fs::read_to_string(dir.path().join("chat_output.csv")).unwrap();
    assert!(csv.starts_with("Sender,Body\n"));
}

// ============================================================================
// Non-fatal statuses
// ============================================================================

#[test]
fn test_no_messages_recognized_writes_nothing() {
    let (mut cmd, dir) = chatsift();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "shopping list\nmilk\neggs\n").unwrap();

    cmd.arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("No messages recognized"))
        .stdout(predicate::str::contains("line 1: shopping list"));

    assert!(!dir.path().join("chat_output.json").exists());
    assert!(!dir.path().join("chat_output.csv").exists());
}

#[test]
fn test_empty_input_writes_nothing() {
    let (mut cmd, dir) = chatsift();
    let input = dir.path().join("empty.txt");
    fs::write(&input, "").unwrap();

    cmd.arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Transcript is empty"));

    assert!(!dir.path().join("chat_output.json").exists());
}

#[test]
fn test_unmatched_lines_are_listed() {
    let (mut cmd, _dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("3 lines not attached to any message"))
        .stdout(predicate::str::contains("line 2: 22/01/25, 11:51 am - Priya created group"));
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_missing_input_fails() {
    let (mut cmd, _dir) = chatsift();
    cmd.arg("does_not_exist.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_reject_policy_fails_on_bad_timestamp() {
    let (mut cmd, dir) = chatsift();
    let input = dir.path().join("bad.txt");
    fs::write(&input, "31/02/25, 10:00 am - Alice: impossible\n").unwrap();

    cmd.arg(&input)
        .args(["--timestamp-policy", "reject"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed timestamp"));
}

#[test]
fn test_unwritable_target_reported_others_written() {
    let (mut cmd, dir) = chatsift();
    // A directory where the JSON file should go makes that target fail.
    fs::create_dir(dir.path().join("chat_output.json")).unwrap();

    cmd.arg(fixture("group_chat.txt"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 of 2 outputs could not be written"));

    assert!(dir.path().join("chat_output.csv").is_file());
}

#[test]
fn test_invalid_column_rejected() {
    let (mut cmd, _dir) = chatsift();
    cmd.arg(fixture("group_chat.txt"))
        .args(["--columns", "date,mood"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown column"));
}

#[test]
fn test_help_and_version() {
    let (mut cmd, _dir) = chatsift();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--timestamp-policy"));

    let (mut cmd, _dir) = chatsift();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
