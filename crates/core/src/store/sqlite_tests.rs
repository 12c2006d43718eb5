// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::classify::Classification;
use crate::note::{NoteKind, OwnerKind};
use crate::predicate::{Clause, Scope, StateFilter};
use crate::testing::{all_classifications, new_note, seed, t0, universe};
use std::sync::Arc;

fn resolve_change(by: &str) -> ResolutionChange {
    ResolutionChange::Resolve(Resolution { at: t0(), by: ActorId::new(by) })
}

fn ids(notes: &[Note]) -> Vec<NoteId> {
    notes.iter().map(|n| n.id).collect()
}

#[test]
fn insert_and_get_note() {
    let store = SqliteStore::open_in_memory().unwrap();
    let inserted = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();

    let fetched = store.get(inserted.id).unwrap();
    assert_eq!(fetched, inserted);
    assert_eq!(fetched.kind, NoteKind::DiffNote);
    assert_eq!(fetched.created_at, t0());
    assert!(fetched.resolution.is_none());
}

#[test]
fn get_missing_note() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(matches!(store.get(NoteId(99)), Err(Error::NoteNotFound(NoteId(99)))));
}

#[test]
fn ids_are_assigned_in_order() {
    let store = SqliteStore::open_in_memory().unwrap();
    let a = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    let b = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    assert!(b.id > a.id);
}

#[test]
fn update_resolution_sets_both_fields() {
    let store = SqliteStore::open_in_memory().unwrap();
    let note = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    let only = NoteFilter::all().and(Clause::Ids(vec![note.id]));

    let affected =
        store.update_resolution(&only, &resolve_change("u1"), &Cancellation::none()).unwrap();
    assert_eq!(affected, 1);

    let stored = store.get(note.id).unwrap();
    assert_eq!(stored.resolved_at(), Some(t0()));
    assert_eq!(stored.resolved_by(), Some(&ActorId::new("u1")));

    let affected = store
        .update_resolution(&only, &ResolutionChange::Unresolve, &Cancellation::none())
        .unwrap();
    assert_eq!(affected, 1);
    assert!(store.get(note.id).unwrap().resolution.is_none());
}

#[test]
fn conditional_update_skips_rows_that_no_longer_match() {
    let store = SqliteStore::open_in_memory().unwrap();
    let note = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    let table = Arc::new(Classification::default());
    let guard = NoteFilter::eligible(&table, StateFilter::Unresolved)
        .and(Clause::Ids(vec![note.id]));

    let first =
        store.update_resolution(&guard, &resolve_change("u1"), &Cancellation::none()).unwrap();
    let second =
        store.update_resolution(&guard, &resolve_change("u2"), &Cancellation::none()).unwrap();

    assert_eq!((first, second), (1, 0));
    assert_eq!(store.get(note.id).unwrap().resolved_by(), Some(&ActorId::new("u1")));
}

#[test]
fn schema_rejects_half_resolution() {
    let store = SqliteStore::open_in_memory().unwrap();
    let note = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();

    let result = store.lock().execute(
        "UPDATE notes SET resolved_at = ?1 WHERE id = ?2",
        params!["2026-01-01T00:00:00+00:00", note.id.0],
    );
    assert!(result.is_err());
    assert!(store.get(note.id).unwrap().resolution.is_none());
}

#[test]
fn half_resolution_in_legacy_data_is_reported_as_corruption() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            owner_kind TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            discussion_id TEXT NOT NULL,
            author TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT '',
            system INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        INSERT INTO notes (kind, owner_kind, owner_id, discussion_id, created_at)
        VALUES ('diff-note', 'merge-request', '!1', 'd1', '2026-01-01T00:00:00+00:00');",
    )
    .unwrap();
    run_migrations(&conn).unwrap();
    conn.execute("UPDATE notes SET resolved_by = 'ghost'", []).unwrap();

    let store = SqliteStore { conn: Mutex::new(conn) };
    assert!(store.get(NoteId(1)).is_err());
}

#[test]
fn migration_adds_resolution_columns() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            owner_kind TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            discussion_id TEXT NOT NULL,
            author TEXT NOT NULL DEFAULT '',
            body TEXT NOT NULL DEFAULT '',
            system INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );",
    )
    .unwrap();

    run_migrations(&conn).unwrap();
    // Second run is a no-op
    run_migrations(&conn).unwrap();

    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info('notes')
             WHERE name IN ('resolved_at', 'resolved_by')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn invalid_kind_in_database_is_corruption() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .lock()
        .execute(
            "INSERT INTO notes (kind, owner_kind, owner_id, discussion_id, created_at)
             VALUES ('comment', 'merge-request', '!1', 'd1', '2026-01-01T00:00:00+00:00')",
            [],
        )
        .unwrap();
    assert!(matches!(store.get(NoteId(1)), Err(Error::Database(_))));
}

#[test]
fn fetch_by_scope() {
    let store = SqliteStore::open_in_memory().unwrap();
    let a = store
        .insert(NewNote::new(NoteKind::DiffNote, OwnerKind::MergeRequest, "!1", "d1", t0()))
        .unwrap();
    let b = store
        .insert(NewNote::new(NoteKind::DiffNote, OwnerKind::MergeRequest, "!1", "d2", t0()))
        .unwrap();
    store.insert(NewNote::new(NoteKind::DiffNote, OwnerKind::Issue, "!1", "d1", t0())).unwrap();

    let owner = Scope::owner(OwnerKind::MergeRequest, "!1");
    assert_eq!(ids(&store.fetch(&NoteFilter::all().within(&owner)).unwrap()), vec![a.id, b.id]);

    let thread = owner.discussion("d2");
    assert_eq!(ids(&store.fetch(&NoteFilter::all().within(&thread)).unwrap()), vec![b.id]);
}

#[test]
fn sql_selection_matches_in_memory_predicate() {
    let notes = universe();
    let store = SqliteStore::open_in_memory().unwrap();
    seed(&store, &notes);

    for table in all_classifications() {
        let table = Arc::new(table);
        for state in [
            StateFilter::Any,
            StateFilter::Resolvable,
            StateFilter::Unresolved,
            StateFilter::Resolved,
        ] {
            let filter = NoteFilter::eligible(&table, state);
            let expected: Vec<NoteId> =
                notes.iter().filter(|n| filter.matches(n)).map(|n| n.id).collect();
            let selected = ids(&store.fetch(&filter).unwrap());
            assert_eq!(selected, expected, "{state} under {table:?}");
        }
    }
}

#[test]
fn snapshot_larger_than_variable_limit() {
    let store = SqliteStore::open_in_memory().unwrap();
    let first = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    let second = store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    let missing = (1_000..41_000).map(NoteId);
    let scope = Scope::ids([first.id, second.id].into_iter().chain(missing));

    let filter = NoteFilter::all().within(&scope);
    assert_eq!(ids(&store.fetch(&filter).unwrap()), vec![first.id, second.id]);
    let affected =
        store.update_resolution(&filter, &resolve_change("u1"), &Cancellation::none()).unwrap();
    assert_eq!(affected, 2);
}

#[test]
fn cancelled_update_writes_nothing() {
    let store = SqliteStore::open_in_memory().unwrap();
    for _ in 0..3 {
        store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();
    }
    let cancel = Cancellation::none();
    cancel.cancel();

    let result = store.update_resolution(&NoteFilter::all(), &resolve_change("u1"), &cancel);
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(store.fetch(&NoteFilter::all()).unwrap().iter().all(|n| n.resolution.is_none()));
}

#[test]
fn deadline_during_bulk_update_rolls_back() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .lock()
        .execute(
            "WITH RECURSIVE seq(i) AS (SELECT 1 UNION ALL SELECT i + 1 FROM seq WHERE i < 200000)
             INSERT INTO notes (kind, owner_kind, owner_id, discussion_id, created_at)
             SELECT 'diff-note', 'merge-request', '!1', 'd1', '2026-01-01T00:00:00+00:00'
             FROM seq",
            [],
        )
        .unwrap();

    let cancel = Cancellation::with_timeout(std::time::Duration::from_millis(3));
    let result = store.update_resolution(&NoteFilter::all(), &resolve_change("u1"), &cancel);
    assert!(matches!(result, Err(Error::Cancelled)));

    let resolved: i64 = store
        .lock()
        .query_row("SELECT COUNT(*) FROM notes WHERE resolved_at IS NOT NULL", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(resolved, 0);
}

#[test]
fn progress_handler_is_cleared_after_update() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.insert(new_note(NoteKind::DiffNote, OwnerKind::MergeRequest)).unwrap();

    let cancel = Cancellation::none();
    store.update_resolution(&NoteFilter::all(), &resolve_change("u1"), &cancel).unwrap();
    cancel.cancel();

    // A later read must not be interrupted by the earlier token.
    assert_eq!(store.fetch(&NoteFilter::all()).unwrap().len(), 1);
}

#[test]
fn open_on_disk_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("notes.db");

    let id = {
        let store = SqliteStore::open(&path).unwrap();
        store.insert(new_note(NoteKind::DiscussionNote, OwnerKind::MergeRequest)).unwrap().id
    };

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.get(id).unwrap().kind, NoteKind::DiscussionNote);
}
