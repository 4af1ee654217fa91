//! Integration tests for slot persistence via CLI.
//!
//! These tests verify the durable slot contract:
//! - The list survives across separate invocations
//! - The slot file holds a plain JSON array of {id, text, completed} records
//! - Corrupt or incompatible slot content falls back to the empty list
//! - Action logging is appended without affecting command output

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

// === Persistence Tests ===

#[test]
fn test_list_survives_invocations() {
    let env = TestEnv::new();
    let id = env.add("Buy milk");
    env.tl().args(["toggle", &id]).assert().success();

    // A fresh process sees the same state.
    let listed = env.list_json();
    assert_eq!(listed["count"], 1);
    assert_eq!(listed["tasks"][0]["text"], "Buy milk");
    assert_eq!(listed["tasks"][0]["completed"], true);
}

#[test]
fn test_slot_file_shape() {
    let env = TestEnv::new();
    env.add("Buy milk");

    let raw = fs::read_to_string(env.slot_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    let record = records[0].as_object().unwrap();
    assert!(record.contains_key("id"));
    assert_eq!(record["text"], "Buy milk");
    assert_eq!(record["completed"], false);
}

#[test]
fn test_corrupt_slot_falls_back_to_empty() {
    let env = TestEnv::new();
    env.add("Buy milk");

    fs::write(env.slot_path(), "not json {").unwrap();

    env.tl()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":0"));
}

#[test]
fn test_incompatible_slot_replaced_at_next_save() {
    let env = TestEnv::new();

    fs::write(env.slot_path(), r#"{"version": 2, "items": []}"#).unwrap();

    // The next mutation starts from the default and rewrites the slot.
    env.add("fresh start");

    let raw = fs::read_to_string(env.slot_path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["text"], "fresh start");
}

#[test]
fn test_data_dir_flag_overrides_env() {
    let env = TestEnv::new();
    let other = common::TempDir::new().unwrap();

    env.tl()
        .args(["-D", other.path().to_str().unwrap(), "add", "elsewhere"])
        .assert()
        .success();

    // Nothing landed in the env-var directory.
    assert_eq!(env.list_json()["count"], 0);
    assert!(other.path().join("todos-v1.json").exists());
}

// === Action Log Tests ===

#[test]
fn test_commands_append_action_log() {
    let env = TestEnv::new();
    env.add("Buy milk");
    env.tl().args(["list"]).assert().success();

    let raw = fs::read_to_string(env.data_path().join("action.log")).unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["command"], "add");
    assert_eq!(first["success"], true);
}

#[test]
fn test_failed_command_logged_with_error() {
    let env = TestEnv::new();

    env.tl().args(["toggle", "zzzz"]).assert().failure();

    let raw = fs::read_to_string(env.data_path().join("action.log")).unwrap();
    let entry: serde_json::Value = serde_json::from_str(raw.lines().next().unwrap()).unwrap();
    assert_eq!(entry["command"], "toggle");
    assert_eq!(entry["success"], false);
    assert!(entry["error"].as_str().unwrap().contains("No task matches"));
}
