// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The shared note predicate.
//!
//! A [`NoteFilter`] is a conjunction of [`Clause`]s with two renderings:
//! [`NoteFilter::matches`] evaluates it against a note in memory and
//! [`NoteFilter::to_sql`] compiles it to a `WHERE` clause for the SQLite
//! store. Per-note checks (`is_resolved`, `to_be_resolved`) and bulk
//! selections are all built by [`NoteFilter::eligible`], so the set a bulk
//! update touches is the set of notes whose per-note check says yes.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::classify::Classification;
use crate::error::{Error, Result};
use crate::note::{Note, NoteId, OwnerKind};

/// Which resolution state a selection asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateFilter {
    /// Every note, eligible or not.
    #[default]
    Any,
    /// Eligible notes in either state.
    Resolvable,
    /// Eligible notes waiting to be resolved.
    Unresolved,
    /// Eligible notes that are resolved.
    Resolved,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateFilter::Any => "any",
            StateFilter::Resolvable => "resolvable",
            StateFilter::Unresolved => "unresolved",
            StateFilter::Resolved => "resolved",
        }
    }
}

impl fmt::Display for StateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StateFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "any" | "all" => Ok(StateFilter::Any),
            "resolvable" => Ok(StateFilter::Resolvable),
            "unresolved" => Ok(StateFilter::Unresolved),
            "resolved" => Ok(StateFilter::Resolved),
            _ => Err(Error::Config(format!(
                "invalid state filter '{s}': expected any, resolvable, unresolved or resolved"
            ))),
        }
    }
}

/// One condition of a [`NoteFilter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Kind and owner kind are in the classification table.
    PotentiallyResolvable(Arc<Classification>),
    /// Not authored by the system.
    NotSystem,
    Unresolved,
    Resolved,
    /// Attached to this owner.
    Owner { kind: OwnerKind, id: String },
    /// Member of this discussion.
    Discussion(String),
    /// One of these notes. An empty list matches nothing.
    Ids(Vec<NoteId>),
}

impl Clause {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            Clause::PotentiallyResolvable(table) => {
                table.is_potentially_resolvable(note.kind, note.owner_kind)
            }
            Clause::NotSystem => !note.system,
            Clause::Unresolved => note.resolution.is_none(),
            Clause::Resolved => note.resolution.is_some(),
            Clause::Owner { kind, id } => note.owner_kind == *kind && note.owner_id == *id,
            Clause::Discussion(id) => note.discussion_id == *id,
            Clause::Ids(ids) => ids.contains(&note.id),
        }
    }

    fn push_sql(&self, params: &mut Vec<Value>) -> String {
        match self {
            Clause::PotentiallyResolvable(table) => {
                if table.resolvable_kinds.is_empty() {
                    return "0".to_string();
                }
                let marks = vec!["?"; table.resolvable_kinds.len()].join(", ");
                params.extend(
                    table.resolvable_kinds.iter().map(|k| Value::Text(k.as_str().to_string())),
                );
                params.push(Value::Text(table.resolvable_owner.as_str().to_string()));
                format!("kind IN ({marks}) AND owner_kind = ?")
            }
            Clause::NotSystem => "system = 0".to_string(),
            Clause::Unresolved => "resolved_at IS NULL".to_string(),
            Clause::Resolved => "resolved_at IS NOT NULL".to_string(),
            Clause::Owner { kind, id } => {
                params.push(Value::Text(kind.as_str().to_string()));
                params.push(Value::Text(id.clone()));
                "owner_kind = ? AND owner_id = ?".to_string()
            }
            Clause::Discussion(id) => {
                params.push(Value::Text(id.clone()));
                "discussion_id = ?".to_string()
            }
            Clause::Ids(ids) => {
                if ids.is_empty() {
                    return "0".to_string();
                }
                // One JSON array parameter keeps large snapshots under
                // SQLite's bound-variable limit.
                let list: Vec<String> = ids.iter().map(|id| id.0.to_string()).collect();
                params.push(Value::Text(format!("[{}]", list.join(","))));
                "id IN (SELECT value FROM json_each(?))".to_string()
            }
        }
    }
}

/// A compiled `WHERE` clause and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlWhere {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A conjunction of clauses. No clauses matches every note.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoteFilter {
    clauses: Vec<Clause>,
}

impl NoteFilter {
    /// Matches every note.
    pub fn all() -> Self {
        NoteFilter::default()
    }

    /// The eligibility predicate for a state.
    ///
    /// This is the only constructor of eligibility conditions; the engine's
    /// per-note checks and its bulk updates both go through it.
    pub fn eligible(table: &Arc<Classification>, state: StateFilter) -> Self {
        let mut filter = NoteFilter::all();
        if state == StateFilter::Any {
            return filter;
        }
        filter.clauses.push(Clause::PotentiallyResolvable(Arc::clone(table)));
        filter.clauses.push(Clause::NotSystem);
        match state {
            StateFilter::Unresolved => filter.clauses.push(Clause::Unresolved),
            StateFilter::Resolved => filter.clauses.push(Clause::Resolved),
            StateFilter::Any | StateFilter::Resolvable => {}
        }
        filter
    }

    /// Adds a clause (builder pattern).
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Restricts the filter to a scope (builder pattern).
    pub fn within(mut self, scope: &Scope) -> Self {
        self.clauses.extend(scope.clauses());
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.clauses.iter().all(|c| c.matches(note))
    }

    /// Compiles the filter against the `notes` table columns.
    pub fn to_sql(&self) -> SqlWhere {
        let mut params = Vec::new();
        if self.clauses.is_empty() {
            return SqlWhere { sql: "1".to_string(), params };
        }
        let parts: Vec<String> =
            self.clauses.iter().map(|c| format!("({})", c.push_sql(&mut params))).collect();
        SqlWhere { sql: parts.join(" AND "), params }
    }
}

/// The collection a bulk operation covers.
///
/// Every part is optional; an empty scope covers the whole store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<(OwnerKind, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_ids: Option<Vec<NoteId>>,
}

impl Scope {
    /// Every note in the store.
    pub fn all() -> Self {
        Scope::default()
    }

    /// Notes on one owner object.
    pub fn owner(kind: OwnerKind, id: impl Into<String>) -> Self {
        Scope { owner: Some((kind, id.into())), ..Scope::default() }
    }

    /// Exactly the given notes, as they are now in the store.
    pub fn notes(notes: &[Note]) -> Self {
        Scope::ids(notes.iter().map(|n| n.id))
    }

    pub fn ids(ids: impl IntoIterator<Item = NoteId>) -> Self {
        Scope { note_ids: Some(ids.into_iter().collect()), ..Scope::default() }
    }

    /// Narrows to one discussion (builder pattern).
    pub fn discussion(mut self, id: impl Into<String>) -> Self {
        self.discussion_id = Some(id.into());
        self
    }

    fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::new();
        if let Some((kind, id)) = &self.owner {
            clauses.push(Clause::Owner { kind: *kind, id: id.clone() });
        }
        if let Some(id) = &self.discussion_id {
            clauses.push(Clause::Discussion(id.clone()));
        }
        if let Some(ids) = &self.note_ids {
            clauses.push(Clause::Ids(ids.clone()));
        }
        clauses
    }
}

#[cfg(test)]
#[path = "predicate_tests.rs"]
mod tests;
