// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The resolution engine.
//!
//! [`Engine`] exposes per-note transitions ([`Engine::resolve`],
//! [`Engine::unresolve`]) and bulk transitions ([`Engine::resolve_all`],
//! [`Engine::unresolve_all`]) over a [`NoteStore`]. Every check and every
//! selection goes through [`Engine::filter`], so a bulk call transitions
//! exactly the notes the per-note checks would.
//!
//! State machine per eligible note:
//!
//! ```text
//! Unresolved --resolve(actor)--> Resolved
//! Resolved   --unresolve()-----> Unresolved
//! ```
//!
//! Calls outside the source state, and any call on an ineligible note, are
//! no-ops rather than errors.

use std::sync::Arc;

use crate::cancel::Cancellation;
use crate::classify::Classification;
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::note::{ActorId, Note, NoteId, NoteKind, OwnerKind, Resolution};
use crate::predicate::{Clause, NoteFilter, Scope, StateFilter};
use crate::store::{NoteStore, ResolutionChange};

/// Result of a single-note transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The note as stored after the call.
    pub note: Note,
    /// True when this call wrote the change, false for a no-op or a lost race.
    pub changed: bool,
}

impl Transition {
    fn unchanged(note: Note) -> Self {
        Transition { note, changed: false }
    }
}

/// Resolution engine over a note store.
///
/// Holds no mutable state of its own; share it between workers with `Arc`.
pub struct Engine<S: NoteStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    classification: Arc<Classification>,
}

impl<S: NoteStore> Engine<S, SystemClock> {
    /// Creates an engine that timestamps transitions with the system clock.
    pub fn new(store: S, classification: Classification) -> Self {
        Self::with_clock(store, classification, SystemClock)
    }
}

impl<S: NoteStore, C: Clock> Engine<S, C> {
    /// Creates an engine with a custom clock.
    pub fn with_clock(store: S, classification: Classification, clock: C) -> Self {
        Engine { store, clock, classification: Arc::new(classification) }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// The shared eligibility predicate for `state`.
    pub fn filter(&self, state: StateFilter) -> NoteFilter {
        NoteFilter::eligible(&self.classification, state)
    }

    pub fn is_potentially_resolvable(&self, kind: NoteKind, owner: OwnerKind) -> bool {
        self.classification.is_potentially_resolvable(kind, owner)
    }

    /// Potentially resolvable and not system-generated.
    pub fn is_resolvable(&self, note: &Note) -> bool {
        self.filter(StateFilter::Resolvable).matches(note)
    }

    /// Resolvable and carrying a resolution.
    ///
    /// False for ineligible notes even if resolution fields are set.
    pub fn is_resolved(&self, note: &Note) -> bool {
        self.filter(StateFilter::Resolved).matches(note)
    }

    /// Resolvable and not yet resolved.
    pub fn to_be_resolved(&self, note: &Note) -> bool {
        self.filter(StateFilter::Unresolved).matches(note)
    }

    /// Notes in `notes` matching `state`, in input order.
    pub fn select<'a>(&self, notes: &'a [Note], state: StateFilter) -> Vec<&'a Note> {
        let filter = self.filter(state);
        notes.iter().filter(|n| filter.matches(n)).collect()
    }

    pub fn select_resolvable<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        self.select(notes, StateFilter::Resolvable)
    }

    pub fn select_unresolved<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        self.select(notes, StateFilter::Unresolved)
    }

    pub fn select_resolved<'a>(&self, notes: &'a [Note]) -> Vec<&'a Note> {
        self.select(notes, StateFilter::Resolved)
    }

    pub fn get(&self, id: NoteId) -> Result<Note> {
        self.store.get(id)
    }

    /// Reads the notes in `scope` matching `state` from the store.
    pub fn fetch(&self, scope: &Scope, state: StateFilter) -> Result<Vec<Note>> {
        self.store.fetch(&self.filter(state).within(scope))
    }

    /// Marks a note as resolved by `actor`.
    ///
    /// Returns the note unchanged when it is ineligible or already resolved.
    /// Otherwise writes the resolution with a conditional update guarded on
    /// the note still being unresolved. If another writer got there first the
    /// guard fails and the stored note is returned as it is now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActor`] for a blank actor, even when the call
    /// would otherwise be a no-op, and propagates storage errors. The returned
    /// note only reflects a write that succeeded.
    pub fn resolve(&self, note: &Note, actor: &ActorId) -> Result<Note> {
        self.resolve_note(note, actor).map(|t| t.note)
    }

    /// Like [`Engine::resolve`], and also reports whether this call made the
    /// write.
    pub fn resolve_note(&self, note: &Note, actor: &ActorId) -> Result<Transition> {
        validate_actor(actor)?;
        if !self.to_be_resolved(note) {
            tracing::debug!(note = %note.id, "resolve is a no-op");
            return Ok(Transition::unchanged(note.clone()));
        }

        let resolution = Resolution { at: self.clock.now(), by: actor.clone() };
        let guard = self.filter(StateFilter::Unresolved).and(Clause::Ids(vec![note.id]));
        let change = ResolutionChange::Resolve(resolution.clone());
        let affected = self.store.update_resolution(&guard, &change, &Cancellation::none())?;

        if affected == 0 {
            tracing::debug!(note = %note.id, "note changed concurrently, re-reading");
            return self.store.get(note.id).map(Transition::unchanged);
        }

        tracing::debug!(note = %note.id, actor = %actor, "resolved note");
        let note = Note { resolution: Some(resolution), ..note.clone() };
        Ok(Transition { note, changed: true })
    }

    /// Clears a note's resolution.
    ///
    /// Returns the note unchanged unless it is eligible and resolved. Like
    /// [`Engine::resolve`], the write is guarded on the note still being
    /// resolved.
    pub fn unresolve(&self, note: &Note) -> Result<Note> {
        self.unresolve_note(note).map(|t| t.note)
    }

    /// Like [`Engine::unresolve`], and also reports whether this call made
    /// the write.
    pub fn unresolve_note(&self, note: &Note) -> Result<Transition> {
        if !self.is_resolved(note) {
            tracing::debug!(note = %note.id, "unresolve is a no-op");
            return Ok(Transition::unchanged(note.clone()));
        }

        let guard = self.filter(StateFilter::Resolved).and(Clause::Ids(vec![note.id]));
        let affected = self.store.update_resolution(
            &guard,
            &ResolutionChange::Unresolve,
            &Cancellation::none(),
        )?;

        if affected == 0 {
            tracing::debug!(note = %note.id, "note changed concurrently, re-reading");
            return self.store.get(note.id).map(Transition::unchanged);
        }

        tracing::debug!(note = %note.id, "unresolved note");
        let note = Note { resolution: None, ..note.clone() };
        Ok(Transition { note, changed: true })
    }

    /// Resolves every unresolved, eligible note in `scope` with one
    /// set-based update, and returns how many notes changed.
    ///
    /// All affected notes share one timestamp, captured before the write.
    /// Notes are not re-read; `Note` values the caller holds are stale
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidActor`] for a blank actor,
    /// [`Error::Cancelled`] when `cancel` fires before or during the write
    /// (nothing is written), and storage errors.
    pub fn resolve_all(
        &self,
        scope: &Scope,
        actor: &ActorId,
        cancel: &Cancellation,
    ) -> Result<usize> {
        validate_actor(actor)?;
        let resolution = Resolution { at: self.clock.now(), by: actor.clone() };
        let filter = self.filter(StateFilter::Unresolved).within(scope);
        let affected =
            self.store.update_resolution(&filter, &ResolutionChange::Resolve(resolution), cancel)?;
        tracing::info!(affected, actor = %actor, "resolved notes");
        Ok(affected)
    }

    /// Clears the resolution of every resolved, eligible note in `scope`
    /// with one set-based update, and returns how many notes changed.
    pub fn unresolve_all(&self, scope: &Scope, cancel: &Cancellation) -> Result<usize> {
        let filter = self.filter(StateFilter::Resolved).within(scope);
        let affected = self.store.update_resolution(&filter, &ResolutionChange::Unresolve, cancel)?;
        tracing::info!(affected, "unresolved notes");
        Ok(affected)
    }
}

fn validate_actor(actor: &ActorId) -> Result<()> {
    if actor.is_blank() {
        return Err(Error::InvalidActor);
    }
    Ok(())
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
