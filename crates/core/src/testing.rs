// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, TimeZone, Utc};

use crate::note::{ActorId, NewNote, Note, NoteId, NoteKind, OwnerKind, Resolution};

pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, 9, 30, 0).unwrap()
}

pub(crate) fn new_note(kind: NoteKind, owner: OwnerKind) -> NewNote {
    NewNote::new(kind, owner, "!1", "d1", t0()).with_author("alice").with_body("looks off")
}

/// A detached note, as if already read from a store.
pub(crate) fn note(id: i64, kind: NoteKind, owner: OwnerKind) -> Note {
    new_note(kind, owner).into_note(NoteId(id))
}

pub(crate) fn resolved(mut note: Note, by: &str) -> Note {
    note.resolution = Some(Resolution { at: t0(), by: ActorId::new(by) });
    note
}

pub(crate) fn system(mut note: Note) -> Note {
    note.system = true;
    note
}

/// Every combination of kind, owner, authorship and state, numbered from 1.
pub(crate) fn universe() -> Vec<Note> {
    let mut notes = Vec::new();
    let mut id = 0;
    for kind in NoteKind::ALL {
        for owner in OwnerKind::ALL {
            for is_system in [false, true] {
                for is_resolved in [false, true] {
                    id += 1;
                    let mut n = note(id, kind, owner);
                    n.system = is_system;
                    if is_resolved {
                        n = resolved(n, "seed");
                    }
                    notes.push(n);
                }
            }
        }
    }
    notes
}

/// Every subset of kinds paired with every owner kind.
pub(crate) fn all_classifications() -> Vec<crate::classify::Classification> {
    let mut tables = Vec::new();
    for mask in 0u8..(1 << NoteKind::ALL.len()) {
        let kinds: Vec<NoteKind> = NoteKind::ALL
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| *k)
            .collect();
        for owner in OwnerKind::ALL {
            tables.push(crate::classify::Classification::new(kinds.clone(), owner));
        }
    }
    tables
}

/// Writes `notes` into an empty store, keeping their ids and resolution.
pub(crate) fn seed<S: crate::store::NoteStore>(store: &S, notes: &[Note]) {
    use crate::cancel::Cancellation;
    use crate::predicate::{Clause, NoteFilter};
    use crate::store::ResolutionChange;

    for n in notes {
        let new = NewNote {
            kind: n.kind,
            owner_kind: n.owner_kind,
            owner_id: n.owner_id.clone(),
            discussion_id: n.discussion_id.clone(),
            author: n.author.clone(),
            body: n.body.clone(),
            system: n.system,
            created_at: n.created_at,
        };
        let stored = store.insert(new).unwrap();
        assert_eq!(stored.id, n.id, "seed notes must be numbered from 1");
        if let Some(resolution) = &n.resolution {
            let only = NoteFilter::all().and(Clause::Ids(vec![n.id]));
            store
                .update_resolution(
                    &only,
                    &ResolutionChange::Resolve(resolution.clone()),
                    &Cancellation::none(),
                )
                .unwrap();
        }
    }
}
