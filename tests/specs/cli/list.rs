// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `rv add` and `rv list` commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

fn rv(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("rv");
    cmd.arg("--db")
        .arg(temp.path().join("notes.db"))
        .arg("--config")
        .arg(temp.path().join("rv.toml"))
        .env_remove("RV_DB")
        .env_remove("RV_CONFIG");
    cmd
}

fn init_temp(settings: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("rv.toml"), settings).unwrap();
    temp
}

fn add(temp: &TempDir, args: &[&str]) {
    rv(temp).arg("add").args(args).args(["-a", "alice"]).assert().success();
}

#[test]
fn list_empty_database() {
    let temp = init_temp("");
    rv(&temp).args(["list", "!12"]).assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn add_prints_note_line() {
    let temp = init_temp("");
    rv(&temp)
        .args(["add", "!12", "d1", "-k", "diff-note", "-a", "alice", "-b", "typo here"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added - [diff-note] (unresolved) 1 !12/d1 @alice"))
        .stdout(predicate::str::contains("typo here"));
}

#[test]
fn add_rejects_unknown_kind() {
    let temp = init_temp("");
    rv(&temp)
        .args(["add", "!12", "d1", "-k", "comment"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid note kind"));
}

#[parameterized(
    all = { "all", "1\n2\n3\n" },
    resolvable = { "resolvable", "1\n2\n" },
    unresolved = { "unresolved", "1\n2\n" },
    resolved = { "resolved", "" },
)]
fn list_state_filter(state: &str, expected: &str) {
    let temp = init_temp("");
    add(&temp, &["!12", "d1", "-k", "diff-note"]);
    add(&temp, &["!12", "d1", "-k", "discussion-note"]);
    add(&temp, &["!12", "d1", "-k", "system-note"]);

    rv(&temp)
        .args(["list", "!12", "-s", state, "-o", "ids"])
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn list_marks_ineligible_notes() {
    let temp = init_temp("");
    add(&temp, &["!12", "d1", "-k", "legacy-note"]);
    add(&temp, &["#3", "d1", "-k", "diff-note", "--owner-kind", "issue"]);

    rv(&temp)
        .args(["list", "!12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not resolvable)"));
    rv(&temp)
        .args(["list", "#3", "--owner-kind", "issue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not resolvable)"));
}

#[test]
fn list_follows_configured_classification() {
    let temp = init_temp(
        "[classification]\nresolvable_kinds = [\"diff-note\"]\nresolvable_owner = \"issue\"\n",
    );
    add(&temp, &["#3", "d1", "-k", "diff-note", "--owner-kind", "issue"]);
    add(&temp, &["!12", "d1", "-k", "diff-note"]);

    rv(&temp)
        .args(["list", "#3", "--owner-kind", "issue", "-s", "unresolved", "-o", "ids"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1\n"));
    rv(&temp)
        .args(["list", "!12", "-s", "unresolved", "-o", "ids"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn list_json_output() {
    let temp = init_temp("");
    add(&temp, &["!12", "d1", "-k", "diff-note"]);
    rv(&temp).args(["resolve", "1", "--actor", "bob"]).assert().success();

    let output = rv(&temp).args(["list", "!12", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let note = &json["notes"][0];
    assert_eq!(note["id"], 1);
    assert_eq!(note["kind"], "diff-note");
    assert_eq!(note["state"], "resolved");
    assert_eq!(note["resolved_by"], "bob");
    assert!(note["resolved_at"].is_string());
}

#[test]
fn missing_named_settings_file_fails() {
    let temp = TempDir::new().unwrap();
    rv(&temp)
        .args(["list", "!12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: config error"));
}
