// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::Serialize;

use rv_core::{ActorId, Clock, Engine, Note, NoteId, NoteKind, NoteStore, OwnerKind, StateFilter};

use super::owner_scope;
use crate::cli::{OutputFormat, OwnerArgs};
use crate::display::{format_note_line, NoteState};
use crate::error::Result;

/// JSON representation of a note for list output.
#[derive(Serialize)]
struct ListNoteJson<'a> {
    id: NoteId,
    kind: NoteKind,
    owner_kind: OwnerKind,
    owner_id: &'a str,
    discussion_id: &'a str,
    author: &'a str,
    body: &'a str,
    system: bool,
    state: NoteState,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_by: Option<&'a ActorId>,
}

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    notes: Vec<ListNoteJson<'a>>,
    state: StateFilter,
}

pub fn run<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    owner: &OwnerArgs,
    discussion: Option<&str>,
    state: StateFilter,
    format: OutputFormat,
) -> Result<Vec<Note>> {
    let notes = engine.fetch(&owner_scope(owner, discussion), state)?;

    match format {
        OutputFormat::Text => {
            for note in &notes {
                println!("{}", format_note_line(note, NoteState::of(engine, note)));
            }
        }
        OutputFormat::Json => {
            let output = ListOutputJson {
                notes: notes
                    .iter()
                    .map(|note| ListNoteJson {
                        id: note.id,
                        kind: note.kind,
                        owner_kind: note.owner_kind,
                        owner_id: &note.owner_id,
                        discussion_id: &note.discussion_id,
                        author: &note.author,
                        body: &note.body,
                        system: note.system,
                        state: NoteState::of(engine, note),
                        resolved_at: note.resolved_at(),
                        resolved_by: note.resolved_by(),
                    })
                    .collect(),
                state,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Ids => {
            for note in &notes {
                println!("{}", note.id);
            }
        }
    }

    Ok(notes)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
