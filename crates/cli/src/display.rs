// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use rv_core::{ActorId, Clock, DiscussionState, Engine, Note, NoteStore};

/// Maximum body length shown on a list line.
const BODY_WIDTH: usize = 60;

/// How a note reads from the resolution point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteState {
    /// Not taking part in resolution.
    NotResolvable,
    Unresolved,
    Resolved,
}

impl NoteState {
    pub fn of<S: NoteStore, C: Clock>(engine: &Engine<S, C>, note: &Note) -> Self {
        if engine.is_resolved(note) {
            NoteState::Resolved
        } else if engine.to_be_resolved(note) {
            NoteState::Unresolved
        } else {
            NoteState::NotResolvable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NoteState::NotResolvable => "not resolvable",
            NoteState::Unresolved => "unresolved",
            NoteState::Resolved => "resolved",
        }
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn format_resolver(by: &ActorId, at: DateTime<Utc>) -> String {
    format!("by {} at {}", by, format_timestamp(at))
}

/// Shortens a body to one line of at most `width` characters.
pub fn truncate_body(body: &str, width: usize) -> String {
    let line = body.lines().next().unwrap_or_default();
    if line.chars().count() <= width && !body.contains('\n') {
        return line.to_string();
    }
    let kept: String = line.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept.trim_end())
}

/// Format a note as a single line for list output.
pub fn format_note_line(note: &Note, state: NoteState) -> String {
    let state_display = match (&note.resolution, state) {
        (Some(r), NoteState::Resolved) => {
            format!("{}, {}", state.as_str(), format_resolver(&r.by, r.at))
        }
        _ => state.as_str().to_string(),
    };
    let mut line = format!(
        "- [{}] ({}) {} {}/{}",
        note.kind, state_display, note.id, note.owner_id, note.discussion_id
    );
    if !note.author.is_empty() {
        line.push_str(&format!(" @{}", note.author));
    }
    if !note.body.is_empty() {
        line.push_str(&format!(": {}", truncate_body(&note.body, BODY_WIDTH)));
    }
    line
}

/// Format a discussion summary line.
pub fn format_discussion_line(id: &str, notes: usize, state: &DiscussionState) -> String {
    let summary = if !state.is_resolvable() {
        NoteState::NotResolvable.as_str().to_string()
    } else {
        match (state.resolved_by(), state.resolved_at()) {
            (Some(by), Some(at)) => format!("resolved, {}", format_resolver(by, at)),
            _ => format!("{}/{} resolved", state.resolved, state.resolvable),
        }
    };
    let plural = if notes == 1 { "" } else { "s" };
    format!("- {} ({}) {} note{}", id, summary, notes, plural)
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
