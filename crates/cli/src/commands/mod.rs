// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod add;
pub mod discussions;
pub mod list;
pub mod resolve;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use rv_core::{Engine, Scope, SqliteStore};

use crate::cli::OwnerArgs;
use crate::config::Loaded;
use crate::error::Result;

/// Helper to open the engine from settings and the command line.
pub fn open_engine(config: Option<PathBuf>, db: Option<PathBuf>) -> Result<Engine<SqliteStore>> {
    let loaded = Loaded::locate(config)?;
    let db_path = loaded.database(db)?;
    let store = SqliteStore::open(&db_path)?;
    Ok(Engine::new(store, loaded.settings.classification))
}

/// The scope covering an owner, optionally narrowed to one discussion.
pub(crate) fn owner_scope(owner: &OwnerArgs, discussion: Option<&str>) -> Scope {
    let scope = Scope::owner(owner.owner_kind, owner.owner.clone());
    match discussion {
        Some(id) => scope.discussion(id),
        None => scope,
    }
}
