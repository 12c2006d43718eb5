// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for rv-core operations.

use thiserror::Error;

use crate::note::NoteId;

/// All possible errors that can occur in rv-core operations.
///
/// Transitions that have nothing to do (ineligible note, note already in the
/// target state) are not errors; they report zero affected rows or return the
/// note unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid actor: a non-empty acting user is required to resolve notes")]
    InvalidActor,

    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    #[error(
        "invalid note kind: '{0}'\n  hint: valid kinds are: diff-note, discussion-note, legacy-note, system-note"
    )]
    InvalidNoteKind(String),

    #[error(
        "invalid owner kind: '{0}'\n  hint: valid owner kinds are: merge-request, issue, commit, snippet"
    )]
    InvalidOwnerKind(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for rv-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
