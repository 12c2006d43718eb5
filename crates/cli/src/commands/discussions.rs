// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde::Serialize;

use rv_core::{ActorId, Clock, Discussion, Engine, NoteStore};

use crate::cli::{OutputFormat, OwnerArgs};
use crate::display::format_discussion_line;
use crate::error::Result;

/// JSON representation of a discussion summary.
#[derive(Serialize)]
struct DiscussionJson<'a> {
    id: &'a str,
    notes: usize,
    resolvable: usize,
    resolved: usize,
    is_resolved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_by: Option<&'a ActorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolved_at: Option<DateTime<Utc>>,
}

pub fn run<S: NoteStore, C: Clock>(
    engine: &Engine<S, C>,
    owner: &OwnerArgs,
    format: OutputFormat,
) -> Result<Vec<Discussion>> {
    let discussions = engine.discussions(owner.owner_kind, &owner.owner)?;

    match format {
        OutputFormat::Text => {
            for d in &discussions {
                println!("{}", format_discussion_line(&d.id, d.notes.len(), &d.state));
            }
        }
        OutputFormat::Json => {
            let output: Vec<DiscussionJson<'_>> = discussions
                .iter()
                .map(|d| DiscussionJson {
                    id: &d.id,
                    notes: d.notes.len(),
                    resolvable: d.state.resolvable,
                    resolved: d.state.resolved,
                    is_resolved: d.state.is_resolved(),
                    resolved_by: d.state.resolved_by(),
                    resolved_at: d.state.resolved_at(),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Ids => {
            for d in discussions.iter().filter(|d| d.state.to_be_resolved()) {
                println!("{}", d.id);
            }
        }
    }

    Ok(discussions)
}

#[cfg(test)]
#[path = "discussions_tests.rs"]
mod tests;
