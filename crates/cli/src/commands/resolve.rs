// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single and bulk resolution commands.

use std::time::Duration;

use serde::Serialize;

use rv_core::{ActorId, Cancellation, Clock, Engine, Note, NoteId, NoteStore};

use super::owner_scope;
use crate::cli::{BulkArgs, OutputFormat};
use crate::error::Result;

/// What a single transition did to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    /// Already in the target state.
    Unchanged,
    NotResolvable,
}

/// JSON output structure for the bulk commands.
#[derive(Serialize)]
struct BulkOutputJson<'a> {
    action: &'a str,
    affected: usize,
}

pub fn resolve<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    ids: &[NoteId],
    actor: &ActorId,
) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(ids.len());
    for id in ids {
        let note = engine.get(*id)?;
        let after = engine.resolve_note(&note, actor)?;

        let outcome = classify(engine, &note, after.changed);
        match (outcome, after.note.resolution.as_ref()) {
            (Outcome::Changed, _) => println!("Resolved note {}", id),
            (Outcome::Unchanged, Some(r)) => {
                println!("Note {} already resolved by {}", id, r.by);
            }
            (Outcome::Unchanged, None) => println!("Note {} left unresolved", id),
            (Outcome::NotResolvable, _) => print_not_resolvable(&note),
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

pub fn unresolve<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    ids: &[NoteId],
) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(ids.len());
    for id in ids {
        let note = engine.get(*id)?;
        let after = engine.unresolve_note(&note)?;

        let outcome = classify(engine, &note, after.changed);
        match outcome {
            Outcome::Changed => println!("Unresolved note {}", id),
            Outcome::Unchanged => println!("Note {} is not resolved", id),
            Outcome::NotResolvable => print_not_resolvable(&note),
        }
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

pub fn resolve_all<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    args: &BulkArgs,
    actor: &ActorId,
) -> Result<usize> {
    let scope = owner_scope(&args.owner, args.discussion.as_deref());
    let affected = engine.resolve_all(&scope, actor, &cancellation(args.timeout))?;
    print_bulk("resolved", affected, args.output)?;
    Ok(affected)
}

pub fn unresolve_all<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    args: &BulkArgs,
) -> Result<usize> {
    let scope = owner_scope(&args.owner, args.discussion.as_deref());
    let affected = engine.unresolve_all(&scope, &cancellation(args.timeout))?;
    print_bulk("unresolved", affected, args.output)?;
    Ok(affected)
}

fn classify<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    note: &Note,
    changed: bool,
) -> Outcome {
    if !engine.is_resolvable(note) {
        Outcome::NotResolvable
    } else if changed {
        Outcome::Changed
    } else {
        Outcome::Unchanged
    }
}

fn cancellation(timeout: Option<u64>) -> Cancellation {
    match timeout {
        Some(secs) => Cancellation::with_timeout(Duration::from_secs(secs)),
        None => Cancellation::none(),
    }
}

fn print_not_resolvable(note: &Note) {
    if note.system {
        println!("Note {} is a system note and cannot be resolved", note.id);
    } else {
        println!(
            "Note {} cannot be resolved ({} on {})",
            note.id, note.kind, note.owner_kind
        );
    }
}

fn print_bulk(action: &str, affected: usize, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let plural = if affected == 1 { "" } else { "s" };
            println!("{} note{} {}", affected, plural, action);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&BulkOutputJson { action, affected })?);
        }
        OutputFormat::Ids => println!("{}", affected),
    }
    Ok(())
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
