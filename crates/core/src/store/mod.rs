// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note storage.
//!
//! The engine talks to storage only through [`NoteStore`]. Two backends are
//! provided: [`SqliteStore`] for durable storage and [`MemoryStore`] for tests
//! and embedding.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{run_migrations, SqliteStore, SCHEMA};

use std::sync::Arc;

use crate::cancel::Cancellation;
use crate::error::Result;
use crate::note::{NewNote, Note, NoteId, Resolution};
use crate::predicate::NoteFilter;

/// A write to the resolution fields.
///
/// Timestamp and actor travel together, so no backend can write one without
/// the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionChange {
    Resolve(Resolution),
    Unresolve,
}

/// Storage operations needed by the resolution engine.
pub trait NoteStore: Send + Sync {
    /// Stores a new, unresolved note and returns it with its assigned id.
    fn insert(&self, note: NewNote) -> Result<Note>;

    /// Fetches one note.
    ///
    /// Returns [`crate::Error::NoteNotFound`] when it does not exist.
    fn get(&self, id: NoteId) -> Result<Note>;

    /// Notes matching the filter, ordered by id.
    fn fetch(&self, filter: &NoteFilter) -> Result<Vec<Note>>;

    /// Applies `change` to every note matching `filter` as one atomic,
    /// set-based write, and returns the number of notes changed.
    ///
    /// The filter doubles as the guard of a conditional update: a note that
    /// stopped matching since the caller last looked is left alone. When
    /// `cancel` fires the write is abandoned and nothing is changed.
    fn update_resolution(
        &self,
        filter: &NoteFilter,
        change: &ResolutionChange,
        cancel: &Cancellation,
    ) -> Result<usize>;
}

impl<S: NoteStore + ?Sized> NoteStore for Arc<S> {
    fn insert(&self, note: NewNote) -> Result<Note> {
        (**self).insert(note)
    }

    fn get(&self, id: NoteId) -> Result<Note> {
        (**self).get(id)
    }

    fn fetch(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        (**self).fetch(filter)
    }

    fn update_resolution(
        &self,
        filter: &NoteFilter,
        change: &ResolutionChange,
        cancel: &Cancellation,
    ) -> Result<usize> {
        (**self).update_resolution(filter, change, cancel)
    }
}
