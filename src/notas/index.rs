//! # Display Indexes
//!
//! Notes are identified by UUIDs in storage, which nobody wants to type.
//! The CLI instead shows short positional indexes computed from the
//! listing order:
//!
//! - active notes: `1`, `2`, `3`, …
//! - trashed notes: `t1`, `t2`, …
//!
//! Indexes are recomputed on every listing. They are stable within a
//! session as long as nothing is created or trashed in between, which is
//! all the listing order promises.

use crate::model::{Note, NoteState};
use std::fmt;
use std::str::FromStr;

/// A user-facing index for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayIndex {
    Active(usize),
    Trashed(usize),
}

impl fmt::Display for DisplayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayIndex::Active(i) => write!(f, "{}", i),
            DisplayIndex::Trashed(i) => write!(f, "t{}", i),
        }
    }
}

impl FromStr for DisplayIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('t') {
            if let Ok(n) = rest.parse::<usize>() {
                if n > 0 {
                    return Ok(DisplayIndex::Trashed(n));
                }
            }
        }
        if let Ok(n) = s.parse::<usize>() {
            if n > 0 {
                return Ok(DisplayIndex::Active(n));
            }
        }
        Err(format!("Invalid index format: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNote {
    pub note: Note,
    pub index: DisplayIndex,
}

/// Assigns display indexes. Input order is preserved within each state;
/// active entries come first, then trashed ones.
pub fn index_notes(notes: &[Note]) -> Vec<DisplayNote> {
    let mut active = 0;
    let mut trashed = 0;
    let mut results: Vec<DisplayNote> = notes
        .iter()
        .map(|note| {
            let index = match note.state {
                NoteState::Active => {
                    active += 1;
                    DisplayIndex::Active(active)
                }
                NoteState::Trashed => {
                    trashed += 1;
                    DisplayIndex::Trashed(trashed)
                }
            };
            DisplayNote {
                note: note.clone(),
                index,
            }
        })
        .collect();
    results.sort_by_key(|dn| matches!(dn.index, DisplayIndex::Trashed(_)));
    results
}
