// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Acting user detection.
//!
//! Resolutions record who made them. When `--actor` is not given the CLI
//! falls back to the current user's identity.

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

use std::process::Command;

use rv_core::ActorId;

/// Returns the acting user for a transition.
///
/// Resolution order:
/// 1. The explicit `--actor` value, even if blank
/// 2. Git config user.name
/// 3. Unix username from USER or LOGNAME
///
/// A blank result is passed through; the engine rejects it.
pub fn resolve_actor(explicit: Option<String>) -> ActorId {
    ActorId::new(explicit.or_else(current_user).unwrap_or_default())
}

/// The current user's display name, if one can be found.
pub fn current_user() -> Option<String> {
    get_git_user_name().or_else(get_unix_username)
}

fn get_git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;

    if output.status.success() {
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }
    None
}

fn get_unix_username() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .ok()
        .filter(|s| !s.trim().is_empty())
}
