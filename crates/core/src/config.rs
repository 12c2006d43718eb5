// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Settings file handling.
//!
//! Settings live in a TOML file:
//!
//! ```toml
//! database = "/var/lib/rv/notes.db"
//!
//! [classification]
//! resolvable_kinds = ["diff-note", "discussion-note"]
//! resolvable_owner = "merge-request"
//! ```
//!
//! Every key is optional. A missing `[classification]` table yields the
//! default table.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::classify::Classification;
use crate::error::{Error, Result};

/// Settings loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Which notes take part in resolution.
    #[serde(default)]
    pub classification: Classification,
    /// Path to the SQLite database, when not given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read, and
    /// [`Error::Toml`] if it is not valid settings TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let settings = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Loads settings from `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Settings::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolves the database path against the directory holding the
    /// settings file. Absolute paths are returned as is.
    pub fn database_path(&self, settings_dir: &Path) -> Option<PathBuf> {
        self.database.as_ref().map(|db| {
            if db.is_absolute() {
                db.clone()
            } else {
                settings_dir.join(db)
            }
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
