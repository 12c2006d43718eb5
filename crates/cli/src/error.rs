// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rv_core::NoteId;
use thiserror::Error;

/// All possible errors that can occur in the rvrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    #[error("an acting user is required\n  hint: pass --actor or set git user.name")]
    ActorRequired,

    #[error("operation cancelled\n  hint: nothing was written; raise --timeout to allow more time")]
    Cancelled,

    #[error("cannot determine where to keep the database\n  hint: pass --db or set RV_DB")]
    NoDatabasePath,

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("corrupted data in database: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for rvrs operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<rv_core::Error> for Error {
    fn from(e: rv_core::Error) -> Self {
        match e {
            rv_core::Error::InvalidActor => Error::ActorRequired,
            rv_core::Error::NoteNotFound(id) => Error::NoteNotFound(id),
            rv_core::Error::InvalidNoteKind(_) | rv_core::Error::InvalidOwnerKind(_) => {
                Error::InvalidInput(e.to_string())
            }
            rv_core::Error::Cancelled => Error::Cancelled,
            rv_core::Error::Database(e) => Error::Database(e),
            rv_core::Error::Io(e) => Error::Io(e),
            rv_core::Error::Toml(e) => Error::Config(e.to_string()),
            rv_core::Error::Config(s) => Error::Config(s),
            rv_core::Error::CorruptedData(s) => Error::CorruptedData(s),
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
