// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed note storage.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::{NoteStore, ResolutionChange};
use crate::cancel::Cancellation;
use crate::error::{Error, Result};
use crate::note::{ActorId, NewNote, Note, NoteId, Resolution};
use crate::predicate::NoteFilter;

/// SQL schema for the note store.
pub const SCHEMA: &str = r#"
-- Notes with their resolution state
CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    owner_kind TEXT NOT NULL,
    owner_id TEXT NOT NULL,
    discussion_id TEXT NOT NULL,
    author TEXT NOT NULL DEFAULT '',
    body TEXT NOT NULL DEFAULT '',
    system INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    resolved_at TEXT,
    resolved_by TEXT,
    CHECK ((resolved_at IS NULL) = (resolved_by IS NULL))
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_notes_owner ON notes(owner_kind, owner_id);
CREATE INDEX IF NOT EXISTS idx_notes_discussion ON notes(discussion_id);
"#;

const NOTE_COLUMNS: &str = "id, kind, owner_kind, owner_id, discussion_id, author, body, \
                            system, created_at, resolved_at, resolved_by";

/// How many virtual machine steps SQLite runs between cancellation checks.
const PROGRESS_STEPS: i32 = 1000;

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn note_from_row(row: &Row<'_>) -> std::result::Result<Note, rusqlite::Error> {
    let kind_str: String = row.get(1)?;
    let owner_kind_str: String = row.get(2)?;
    let created_str: String = row.get(8)?;
    let resolved_at: Option<String> = row.get(9)?;
    let resolved_by: Option<String> = row.get(10)?;

    let resolution = match (resolved_at, resolved_by) {
        (None, None) => None,
        (Some(at), Some(by)) => Some(Resolution {
            at: parse_timestamp(&at, "resolved_at")?,
            by: ActorId(by),
        }),
        _ => return Err(corrupted("resolved_at and resolved_by must be set together".into())),
    };

    Ok(Note {
        id: NoteId(row.get(0)?),
        kind: parse_db(&kind_str, "kind")?,
        owner_kind: parse_db(&owner_kind_str, "owner_kind")?,
        owner_id: row.get(3)?,
        discussion_id: row.get(4)?,
        author: row.get(5)?,
        body: row.get(6)?,
        system: row.get(7)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        resolution,
    })
}

/// Run schema creation and all migrations on a database connection.
///
/// Migrations are idempotent and upgrade databases created before notes
/// carried resolution state.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_resolution_columns(conn)?;
    Ok(())
}

/// Migration: Add resolved_at/resolved_by to note tables that predate them.
fn migrate_add_resolution_columns(conn: &Connection) -> Result<()> {
    for column in ["resolved_at", "resolved_by"] {
        let has_column: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info('notes') WHERE name = ?1",
                [column],
                |row| row.get(0),
            )
            .unwrap_or(false);

        if !has_column {
            let sql = format!("ALTER TABLE notes ADD COLUMN {column} TEXT");
            conn.execute(&sql, [])?;
        }
    }
    Ok(())
}

/// SQLite note store.
///
/// The connection sits behind a mutex so one store can be shared by
/// concurrent request workers; other processes are coordinated by SQLite's
/// own locking (WAL mode, busy timeout).
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a database at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        run_migrations(&conn)?;
        tracing::debug!(path = %path.display(), "opened note store");
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(SqliteStore { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoteStore for SqliteStore {
    fn insert(&self, note: NewNote) -> Result<Note> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO notes (kind, owner_kind, owner_id, discussion_id, author, body,
             system, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                note.kind.as_str(),
                note.owner_kind.as_str(),
                note.owner_id,
                note.discussion_id,
                note.author,
                note.body,
                note.system,
                note.created_at.to_rfc3339(),
            ],
        )?;
        let id = NoteId(conn.last_insert_rowid());
        Ok(note.into_note(id))
    }

    fn get(&self, id: NoteId) -> Result<Note> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1");
        let note = self.lock().query_row(&sql, params![id.0], note_from_row).optional()?;
        note.ok_or(Error::NoteNotFound(id))
    }

    fn fetch(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        let compiled = filter.to_sql();
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE {} ORDER BY id", compiled.sql);

        let conn = self.lock();
        let mut stmt = conn.prepare(&sql)?;
        let notes = stmt
            .query_map(params_from_iter(compiled.params), note_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    fn update_resolution(
        &self,
        filter: &NoteFilter,
        change: &ResolutionChange,
        cancel: &Cancellation,
    ) -> Result<usize> {
        if cancel.is_cancelled() {
            tracing::warn!("resolution update cancelled before write");
            return Err(Error::Cancelled);
        }

        let compiled = filter.to_sql();
        let mut values: Vec<Value> = Vec::with_capacity(compiled.params.len() + 2);
        let assignments = match change {
            ResolutionChange::Resolve(resolution) => {
                values.push(Value::Text(resolution.at.to_rfc3339()));
                values.push(Value::Text(resolution.by.0.clone()));
                "resolved_at = ?, resolved_by = ?"
            }
            ResolutionChange::Unresolve => "resolved_at = NULL, resolved_by = NULL",
        };
        values.extend(compiled.params);
        let sql = format!("UPDATE notes SET {assignments} WHERE {}", compiled.sql);

        let conn = self.lock();
        // Waiting for the lock may have outlived the deadline.
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let watch = cancel.clone();
        conn.progress_handler(PROGRESS_STEPS, Some(move || watch.is_cancelled()))?;
        let result = conn.execute(&sql, params_from_iter(values));
        if let Err(e) = conn.progress_handler(0, None::<fn() -> bool>) {
            tracing::warn!(error = %e, "failed to clear progress handler");
        }

        match result {
            Ok(affected) => {
                tracing::debug!(affected, sql = %sql, "updated note resolution");
                Ok(affected)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::OperationInterrupted =>
            {
                tracing::warn!("resolution update interrupted by cancellation");
                Err(Error::Cancelled)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "sqlite_tests.rs"]
mod tests;
