// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! rv-core: resolution tracking for review notes
//!
//! This crate decides which notes in a review thread can be resolved and
//! moves them between the unresolved and resolved states, one at a time or
//! in bulk. Both paths select notes through the same [`NoteFilter`], so a
//! bulk call transitions exactly the notes the per-note checks accept.

pub mod cancel;
pub mod classify;
pub mod clock;
pub mod config;
pub mod discussion;
pub mod engine;
pub mod error;
pub mod note;
pub mod predicate;
pub mod store;

#[cfg(test)]
mod testing;

pub use cancel::Cancellation;
pub use classify::Classification;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Settings;
pub use discussion::{Discussion, DiscussionState};
pub use engine::{Engine, Transition};
pub use error::{Error, Result};
pub use note::{ActorId, NewNote, Note, NoteId, NoteKind, OwnerKind, Resolution};
pub use predicate::{Clause, NoteFilter, Scope, SqlWhere, StateFilter};
pub use store::{MemoryStore, NoteStore, ResolutionChange, SqliteStore};
