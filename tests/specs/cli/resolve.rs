// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for the `rv resolve`, `rv unresolve` and bulk commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// An `rv` command pinned to a database and settings file in `temp`.
fn rv(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("rv");
    cmd.arg("--db")
        .arg(temp.path().join("notes.db"))
        .arg("--config")
        .arg(temp.path().join("rv.toml"))
        .env_remove("RV_DB")
        .env_remove("RV_CONFIG")
        .env_remove("RV_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("rv.toml"), "").unwrap();
    temp
}

fn add_note(temp: &TempDir, discussion: &str, kind: &str) -> String {
    let output = rv(temp)
        .args(["add", "!12", discussion, "-k", kind, "-a", "alice", "-o", "ids"])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn list_ids(temp: &TempDir, state: &str) -> Vec<String> {
    let output = rv(temp).args(["list", "!12", "-s", state, "-o", "ids"]).output().unwrap();
    String::from_utf8_lossy(&output.stdout).lines().map(String::from).collect()
}

// =============================================================================
// Single transitions
// =============================================================================

#[test]
fn resolve_marks_note_resolved() {
    let temp = init_temp();
    let id = add_note(&temp, "d1", "diff-note");

    rv(&temp)
        .args(["resolve", &id, "--actor", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Resolved note {}", id)));

    rv(&temp)
        .args(["list", "!12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resolved, by bob"));
}

#[test]
fn resolve_twice_keeps_first_resolver() {
    let temp = init_temp();
    let id = add_note(&temp, "d1", "diff-note");
    rv(&temp).args(["resolve", &id, "--actor", "bob"]).assert().success();

    rv(&temp)
        .args(["resolve", &id, "--actor", "carol"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already resolved by bob"));
}

#[test]
fn resolve_system_note_is_a_noop() {
    let temp = init_temp();
    let id = add_note(&temp, "d1", "system-note");

    rv(&temp)
        .args(["resolve", &id, "--actor", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("system note"));
    assert!(list_ids(&temp, "resolved").is_empty());
}

#[test]
fn resolve_requires_actor() {
    let temp = init_temp();
    let id = add_note(&temp, "d1", "diff-note");

    rv(&temp)
        .args(["resolve", &id, "--actor", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: an acting user is required"));
    assert!(list_ids(&temp, "resolved").is_empty());
}

#[test]
fn resolve_unknown_note_fails() {
    let temp = init_temp();
    rv(&temp)
        .args(["resolve", "404", "--actor", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note not found: 404"));
}

#[test]
fn unresolve_clears_resolution() {
    let temp = init_temp();
    let id = add_note(&temp, "d1", "discussion-note");
    rv(&temp).args(["resolve", &id, "--actor", "bob"]).assert().success();

    rv(&temp)
        .args(["unresolve", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Unresolved note {}", id)));
    assert_eq!(list_ids(&temp, "unresolved"), vec![id]);
}

// =============================================================================
// Bulk transitions
// =============================================================================

#[test]
fn resolve_all_touches_exactly_the_unresolved_notes() {
    let temp = init_temp();
    add_note(&temp, "d1", "diff-note");
    add_note(&temp, "d1", "discussion-note");
    add_note(&temp, "d2", "legacy-note");
    add_note(&temp, "d2", "system-note");
    let before = list_ids(&temp, "unresolved");

    rv(&temp)
        .args(["resolve-all", "!12", "--actor", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{} notes resolved", before.len())));

    assert_eq!(list_ids(&temp, "resolved"), before);
    assert!(list_ids(&temp, "unresolved").is_empty());
}

#[test]
fn resolve_all_within_discussion() {
    let temp = init_temp();
    add_note(&temp, "d1", "diff-note");
    let d2 = add_note(&temp, "d2", "diff-note");

    rv(&temp)
        .args(["resolve-all", "!12", "-d", "d2", "--actor", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 note resolved"));
    assert_eq!(list_ids(&temp, "resolved"), vec![d2]);
}

#[test]
fn resolve_all_json_output() {
    let temp = init_temp();
    add_note(&temp, "d1", "diff-note");

    let output = rv(&temp)
        .args(["resolve-all", "!12", "--actor", "bob", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["action"], "resolved");
    assert_eq!(json["affected"], 1);
}

#[test]
fn resolve_all_with_nothing_to_do() {
    let temp = init_temp();
    rv(&temp)
        .args(["resolve-all", "!12", "--actor", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 notes resolved"));
}

#[test]
fn unresolve_all_reverts_bulk_resolve() {
    let temp = init_temp();
    add_note(&temp, "d1", "diff-note");
    add_note(&temp, "d1", "diff-note");
    rv(&temp).args(["resolve-all", "!12", "--actor", "bob"]).assert().success();

    rv(&temp)
        .args(["unresolve-all", "!12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 notes unresolved"));
    assert!(list_ids(&temp, "resolved").is_empty());
}

#[test]
fn discussions_show_thread_state() {
    let temp = init_temp();
    add_note(&temp, "d1", "diff-note");
    add_note(&temp, "d2", "diff-note");
    add_note(&temp, "d2", "diff-note");
    rv(&temp).args(["resolve-all", "!12", "-d", "d1", "--actor", "bob"]).assert().success();

    rv(&temp)
        .args(["discussions", "!12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- d1 (resolved, by bob"))
        .stdout(predicate::str::contains("- d2 (0/2 resolved) 2 notes"));

    rv(&temp)
        .args(["discussions", "!12", "-o", "ids"])
        .assert()
        .success()
        .stdout(predicate::str::diff("d2\n"));
}
