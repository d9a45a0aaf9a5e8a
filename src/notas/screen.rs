//! # Notes Screen
//!
//! The working state of the note-taking screen: the note store, the session
//! store, the in-memory counters, the input field and the side menu.
//!
//! This type is the lifecycle coordinator's memory. It does not decide
//! *when* to restore or save; the checkpoint functions in
//! [`crate::commands`] do that. It only guarantees that what gets saved is
//! the current in-memory truth.

use crate::model::Draft;
use crate::session::{SessionState, SessionStore};
use crate::store::backend::StorageBackend;
use crate::store::note_store::NoteStore;
use chrono::{DateTime, Utc};

/// The side menu's animation state. Toggling is not re-entrant: while a
/// transition is in flight, further toggles only report the current state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl MenuState {
    /// Whether the menu is open, or on its way to being open.
    pub fn is_open(self) -> bool {
        matches!(self, MenuState::Opening | MenuState::Open)
    }

    pub fn in_flight(self) -> bool {
        matches!(self, MenuState::Opening | MenuState::Closing)
    }

    /// The resting state an in-flight transition ends in.
    pub fn settled(self) -> Self {
        match self {
            MenuState::Opening | MenuState::Open => MenuState::Open,
            MenuState::Closing | MenuState::Closed => MenuState::Closed,
        }
    }
}

pub struct NotesScreen<B: StorageBackend> {
    pub(crate) notes: NoteStore<B>,
    pub(crate) session: SessionStore<B>,
    pub(crate) state: SessionState,
    pub(crate) input: Draft,
    pub(crate) has_unsaved_data: bool,
    pub(crate) menu: MenuState,
}

impl<B: StorageBackend> NotesScreen<B> {
    pub fn new(notes: NoteStore<B>, session: SessionStore<B>, now: DateTime<Utc>) -> Self {
        Self {
            notes,
            session,
            state: SessionState::new(now),
            input: Draft::default(),
            has_unsaved_data: false,
            menu: MenuState::Closed,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current contents of the input field.
    pub fn input(&self) -> &Draft {
        &self.input
    }

    pub fn has_unsaved_data(&self) -> bool {
        self.has_unsaved_data
    }

    pub fn menu(&self) -> MenuState {
        self.menu
    }

    pub fn notes(&self) -> &NoteStore<B> {
        &self.notes
    }

    /// Write-through checkpoint: mirrors the input field into the draft
    /// slot and persists the whole snapshot.
    pub(crate) fn save(&mut self) -> bool {
        self.state.draft = (!self.input.is_blank()).then(|| self.input.clone());
        self.session.save(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_state_queries() {
        assert!(!MenuState::Closed.is_open());
        assert!(MenuState::Opening.is_open());
        assert!(MenuState::Open.is_open());
        assert!(!MenuState::Closing.is_open());

        assert!(MenuState::Opening.in_flight());
        assert!(MenuState::Closing.in_flight());
        assert!(!MenuState::Open.in_flight());
    }

    #[test]
    fn menu_settles_to_resting_state() {
        assert_eq!(MenuState::Opening.settled(), MenuState::Open);
        assert_eq!(MenuState::Closing.settled(), MenuState::Closed);
        assert_eq!(MenuState::Open.settled(), MenuState::Open);
    }
}
