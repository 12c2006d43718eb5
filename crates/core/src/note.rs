// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core note types for review-thread resolution tracking.
//!
//! This module contains the fundamental data types: Note, NoteKind,
//! OwnerKind, Resolution and ActorId.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Store-assigned note identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub i64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<i64>()
            .map(NoteId)
            .map_err(|_| Error::CorruptedData(format!("invalid note id '{s}'")))
    }
}

/// Kind of a note, as recorded by the authoring flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteKind {
    /// Comment anchored to a line of a diff.
    DiffNote,
    /// Comment that starts or replies to a free-standing discussion.
    DiscussionNote,
    /// Diff comment from before positions were tracked per version.
    LegacyNote,
    /// Note generated by the system (pushes, label changes, ...).
    SystemNote,
}

impl NoteKind {
    /// Every note kind, in declaration order.
    pub const ALL: [NoteKind; 4] = [
        NoteKind::DiffNote,
        NoteKind::DiscussionNote,
        NoteKind::LegacyNote,
        NoteKind::SystemNote,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteKind::DiffNote => "diff-note",
            NoteKind::DiscussionNote => "discussion-note",
            NoteKind::LegacyNote => "legacy-note",
            NoteKind::SystemNote => "system-note",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "diff-note" | "diff" => Ok(NoteKind::DiffNote),
            "discussion-note" | "discussion" => Ok(NoteKind::DiscussionNote),
            "legacy-note" | "legacy" => Ok(NoteKind::LegacyNote),
            "system-note" | "system" => Ok(NoteKind::SystemNote),
            _ => Err(Error::InvalidNoteKind(s.to_string())),
        }
    }
}

/// Kind of object a note's thread is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwnerKind {
    MergeRequest,
    Issue,
    Commit,
    Snippet,
}

impl OwnerKind {
    /// Every owner kind, in declaration order.
    pub const ALL: [OwnerKind; 4] = [
        OwnerKind::MergeRequest,
        OwnerKind::Issue,
        OwnerKind::Commit,
        OwnerKind::Snippet,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::MergeRequest => "merge-request",
            OwnerKind::Issue => "issue",
            OwnerKind::Commit => "commit",
            OwnerKind::Snippet => "snippet",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OwnerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "merge-request" | "mr" => Ok(OwnerKind::MergeRequest),
            "issue" => Ok(OwnerKind::Issue),
            "commit" => Ok(OwnerKind::Commit),
            "snippet" => Ok(OwnerKind::Snippet),
            _ => Err(Error::InvalidOwnerKind(s.to_string())),
        }
    }
}

/// Opaque identifier of the user performing a transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    pub fn new(id: impl Into<String>) -> Self {
        ActorId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty or whitespace-only id stands for "no actor".
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who resolved a note and when.
///
/// Timestamp and actor only exist together, so a note can never carry one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub at: DateTime<Utc>,
    pub by: ActorId,
}

/// A discussion item attached to a review thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier.
    pub id: NoteId,
    pub kind: NoteKind,
    /// Kind of the object the thread is attached to.
    pub owner_kind: OwnerKind,
    /// Identifier of the object the thread is attached to (e.g. "!12").
    pub owner_id: String,
    /// Thread this note belongs to.
    pub discussion_id: String,
    pub author: String,
    pub body: String,
    /// Authored by the system rather than a user.
    pub system: bool,
    pub created_at: DateTime<Utc>,
    /// Present while the note is resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

impl Note {
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolution.as_ref().map(|r| r.at)
    }

    pub fn resolved_by(&self) -> Option<&ActorId> {
        self.resolution.as_ref().map(|r| &r.by)
    }
}

/// Input for the authoring flow. New notes always start unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub kind: NoteKind,
    pub owner_kind: OwnerKind,
    pub owner_id: String,
    pub discussion_id: String,
    pub author: String,
    pub body: String,
    pub system: bool,
    pub created_at: DateTime<Utc>,
}

impl NewNote {
    /// Creates a user-authored note on the given owner.
    ///
    /// `system` is derived from the kind; use [`NewNote::with_system`] to
    /// override it.
    pub fn new(
        kind: NoteKind,
        owner_kind: OwnerKind,
        owner_id: impl Into<String>,
        discussion_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        NewNote {
            kind,
            owner_kind,
            owner_id: owner_id.into(),
            discussion_id: discussion_id.into(),
            author: String::new(),
            body: String::new(),
            system: kind == NoteKind::SystemNote,
            created_at,
        }
    }

    /// Sets the author (builder pattern).
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Sets the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Marks the note as system-generated or not (builder pattern).
    pub fn with_system(mut self, system: bool) -> Self {
        self.system = system;
        self
    }

    /// Builds the stored note once the store has assigned an id.
    pub fn into_note(self, id: NoteId) -> Note {
        Note {
            id,
            kind: self.kind,
            owner_kind: self.owner_kind,
            owner_id: self.owner_id,
            discussion_id: self.discussion_id,
            author: self.author,
            body: self.body,
            system: self.system,
            created_at: self.created_at,
            resolution: None,
        }
    }
}

#[cfg(test)]
#[path = "note_tests.rs"]
mod tests;
