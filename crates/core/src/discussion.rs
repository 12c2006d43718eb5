// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Discussion-level resolution state.
//!
//! A discussion has no resolution fields of its own. It is resolvable when
//! any member note is, and resolved when every resolvable member note is.
//! Resolving a discussion is a bulk transition scoped to its notes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cancel::Cancellation;
use crate::clock::Clock;
use crate::engine::Engine;
use crate::error::Result;
use crate::note::{ActorId, Note, OwnerKind, Resolution};
use crate::predicate::{Scope, StateFilter};
use crate::store::NoteStore;

/// Resolution state derived from a discussion's notes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DiscussionState {
    /// Member notes that take part in resolution.
    pub resolvable: usize,
    /// Resolvable member notes that are resolved.
    pub resolved: usize,
    /// The most recent resolution among member notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_resolution: Option<Resolution>,
}

impl DiscussionState {
    pub fn is_resolvable(&self) -> bool {
        self.resolvable > 0
    }

    pub fn is_resolved(&self) -> bool {
        self.is_resolvable() && self.resolved == self.resolvable
    }

    pub fn to_be_resolved(&self) -> bool {
        self.is_resolvable() && !self.is_resolved()
    }

    /// Who resolved the discussion, once it is fully resolved.
    pub fn resolved_by(&self) -> Option<&ActorId> {
        self.last_resolution.as_ref().filter(|_| self.is_resolved()).map(|r| &r.by)
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.last_resolution.as_ref().filter(|_| self.is_resolved()).map(|r| r.at)
    }
}

/// A thread of notes and its derived state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discussion {
    pub id: String,
    pub notes: Vec<Note>,
    pub state: DiscussionState,
}

impl<S: NoteStore, C: Clock> Engine<S, C> {
    /// Derives the state of a discussion from its member notes.
    pub fn discussion_state(&self, notes: &[Note]) -> DiscussionState {
        let resolvable = self.select_resolvable(notes).len();
        let resolved_notes = self.select_resolved(notes);
        let last_resolution = resolved_notes
            .iter()
            .filter_map(|n| n.resolution.as_ref())
            .max_by_key(|r| r.at)
            .cloned();
        DiscussionState { resolvable, resolved: resolved_notes.len(), last_resolution }
    }

    /// All discussions on an owner, in order of their first note.
    pub fn discussions(&self, owner: OwnerKind, owner_id: &str) -> Result<Vec<Discussion>> {
        let notes = self.fetch(&Scope::owner(owner, owner_id), StateFilter::Any)?;

        let mut grouped: Vec<(String, Vec<Note>)> = Vec::new();
        for note in notes {
            match grouped.iter_mut().find(|(id, _)| *id == note.discussion_id) {
                Some((_, members)) => members.push(note),
                None => grouped.push((note.discussion_id.clone(), vec![note])),
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(id, notes)| {
                let state = self.discussion_state(&notes);
                Discussion { id, notes, state }
            })
            .collect())
    }

    /// Resolves every unresolved note of one discussion.
    pub fn resolve_discussion(
        &self,
        owner: OwnerKind,
        owner_id: &str,
        discussion_id: &str,
        actor: &ActorId,
        cancel: &Cancellation,
    ) -> Result<usize> {
        let scope = Scope::owner(owner, owner_id).discussion(discussion_id);
        self.resolve_all(&scope, actor, cancel)
    }

    /// Unresolves every resolved note of one discussion.
    pub fn unresolve_discussion(
        &self,
        owner: OwnerKind,
        owner_id: &str,
        discussion_id: &str,
        cancel: &Cancellation,
    ) -> Result<usize> {
        let scope = Scope::owner(owner, owner_id).discussion(discussion_id);
        self.unresolve_all(&scope, cancel)
    }
}

#[cfg(test)]
#[path = "discussion_tests.rs"]
mod tests;
