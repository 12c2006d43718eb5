// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the settings file and the database.
//!
//! Settings come from, in order: `--config`, `$RV_CONFIG`, then
//! `<config dir>/rv/config.toml`. A file named explicitly must exist; the
//! default location is optional.
//!
//! The database comes from `--db`, `$RV_DB`, the `database` key of the
//! settings file, then `<data dir>/rv/notes.db`.

use std::path::{Path, PathBuf};

use rv_core::Settings;

use crate::error::{Error, Result};

pub const CONFIG_ENV: &str = "RV_CONFIG";
pub const DB_ENV: &str = "RV_DB";

const APP_DIR_NAME: &str = "rv";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "notes.db";

/// Settings together with the file they were read from.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub settings: Settings,
    pub path: Option<PathBuf>,
}

impl Loaded {
    /// Loads settings from the first location that applies.
    pub fn locate(explicit: Option<PathBuf>) -> Result<Self> {
        let named = explicit.or_else(|| env_path(CONFIG_ENV));
        let default = dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
        Self::load_from(named, default)
    }

    pub(crate) fn load_from(named: Option<PathBuf>, default: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = named {
            let settings = Settings::load(&path)?;
            return Ok(Loaded { settings, path: Some(path) });
        }
        match default {
            Some(path) if path.is_file() => {
                let settings = Settings::load(&path)?;
                Ok(Loaded { settings, path: Some(path) })
            }
            _ => Ok(Loaded::default()),
        }
    }

    /// Picks the database path.
    pub fn database(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        let named = explicit.or_else(|| env_path(DB_ENV));
        let default = dirs::data_dir().map(|d| d.join(APP_DIR_NAME).join(DB_FILE_NAME));
        self.database_from(named, default)
    }

    pub(crate) fn database_from(
        &self,
        named: Option<PathBuf>,
        default: Option<PathBuf>,
    ) -> Result<PathBuf> {
        if let Some(path) = named {
            return Ok(path);
        }
        let settings_dir = self.path.as_deref().and_then(Path::parent).unwrap_or(Path::new("."));
        self.settings
            .database_path(settings_dir)
            .or(default)
            .ok_or(Error::NoDatabasePath)
    }
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key).filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
