// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use rv_core::{Clock, Engine, NewNote, Note, NoteKind, NoteStore};

use crate::cli::{OutputFormat, OwnerArgs};
use crate::display::{format_note_line, NoteState};
use crate::error::Result;
use crate::identity;

/// Note fields taken from the command line.
pub struct AddArgs {
    pub owner: OwnerArgs,
    pub discussion: String,
    pub kind: NoteKind,
    pub author: Option<String>,
    pub body: String,
    pub system: bool,
}

pub fn run<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    args: AddArgs,
    format: OutputFormat,
) -> Result<Note> {
    let author = args.author.or_else(identity::current_user).unwrap_or_default();
    let mut new = NewNote::new(
        args.kind,
        args.owner.owner_kind,
        args.owner.owner,
        args.discussion,
        engine.clock().now(),
    )
    .with_author(author)
    .with_body(args.body);
    if args.system {
        new = new.with_system(true);
    }

    let note = engine.store().insert(new)?;
    tracing::debug!(note = %note.id, kind = %note.kind, "added note");

    match format {
        OutputFormat::Text => {
            println!("Added {}", format_note_line(&note, NoteState::of(engine, &note)));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
        OutputFormat::Ids => println!("{}", note.id),
    }
    Ok(note)
}

#[cfg(test)]
#[path = "add_tests.rs"]
mod tests;
