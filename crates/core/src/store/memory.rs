// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory note storage.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{NoteStore, ResolutionChange};
use crate::cancel::Cancellation;
use crate::error::{Error, Result};
use crate::note::{NewNote, Note, NoteId};
use crate::predicate::NoteFilter;

#[derive(Debug, Default)]
struct Inner {
    notes: BTreeMap<NoteId, Note>,
    last_id: i64,
}

/// A store that keeps notes in a map.
///
/// Every write happens under one lock acquisition, which gives bulk updates
/// the same all-or-nothing behaviour as a single SQL statement.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of stored notes.
    pub fn len(&self) -> usize {
        self.lock().notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoteStore for MemoryStore {
    fn insert(&self, note: NewNote) -> Result<Note> {
        let mut inner = self.lock();
        inner.last_id += 1;
        let note = note.into_note(NoteId(inner.last_id));
        inner.notes.insert(note.id, note.clone());
        Ok(note)
    }

    fn get(&self, id: NoteId) -> Result<Note> {
        self.lock().notes.get(&id).cloned().ok_or(Error::NoteNotFound(id))
    }

    fn fetch(&self, filter: &NoteFilter) -> Result<Vec<Note>> {
        Ok(self.lock().notes.values().filter(|n| filter.matches(n)).cloned().collect())
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

        let mut inner = self.lock();
        // Waiting for the lock may have outlived the deadline.
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut affected = 0;
        for note in inner.notes.values_mut().filter(|n| filter.matches(n)) {
            note.resolution = match change {
                ResolutionChange::Resolve(resolution) => Some(resolution.clone()),
                ResolutionChange::Unresolve => None,
            };
            affected += 1;
        }
        Ok(affected)
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
