// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Eligibility classification: which notes take part in resolution at all.
//!
//! [`Classification`] is the only place that decides which note kinds and
//! which owner kind are resolvable. The shared predicate in
//! [`crate::predicate`] consults it for both in-memory checks and the SQL it
//! compiles, so the per-note and bulk paths cannot disagree.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::note::{NoteKind, OwnerKind};

/// Table of resolvable note kinds and the owner kind they must be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Note kinds that can be resolved.
    #[serde(default = "default_resolvable_kinds")]
    pub resolvable_kinds: BTreeSet<NoteKind>,
    /// The single owner kind whose threads support resolution.
    #[serde(default = "default_resolvable_owner")]
    pub resolvable_owner: OwnerKind,
}

fn default_resolvable_kinds() -> BTreeSet<NoteKind> {
    BTreeSet::from([NoteKind::DiffNote, NoteKind::DiscussionNote])
}

fn default_resolvable_owner() -> OwnerKind {
    OwnerKind::MergeRequest
}

impl Default for Classification {
    /// Diff and discussion notes on merge requests.
    fn default() -> Self {
        Classification {
            resolvable_kinds: default_resolvable_kinds(),
            resolvable_owner: default_resolvable_owner(),
        }
    }
}

impl Classification {
    pub fn new(kinds: impl IntoIterator<Item = NoteKind>, owner: OwnerKind) -> Self {
        Classification { resolvable_kinds: kinds.into_iter().collect(), resolvable_owner: owner }
    }

    /// Whether notes of `kind` on an object of `owner` can ever be resolved.
    ///
    /// Independent of authorship and of current resolution state.
    pub fn is_potentially_resolvable(&self, kind: NoteKind, owner: OwnerKind) -> bool {
        self.resolvable_kinds.contains(&kind) && owner == self.resolvable_owner
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
