//! # Command Layer
//!
//! Business logic for every checkpoint and user action. Each submodule
//! exposes plain functions that take the screen (and whatever else they
//! need), mutate it, and return a [`CmdResult`]. No printing, no exit codes.
//!
//! ## Write-Through
//!
//! Every state-affecting action ends with a session save. Checkpoints that
//! hide the screen save unconditionally. Nothing is batched or debounced.
//!
//! ## Errors
//!
//! Only validation errors escape as `Err`. Storage failures are logged,
//! reported as error messages, and the in-memory state carries on.

use crate::config::NotasConfig;
use crate::index::DisplayNote;
use crate::model::{Draft, Note};
use std::path::PathBuf;

pub mod app;
pub mod config;
pub mod draft;
pub mod helpers;
pub mod lifecycle;
pub mod list;
pub mod menu;
pub mod save_note;
pub mod status;
pub mod trash;

#[derive(Debug, Clone)]
pub struct NotasPaths {
    pub data: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Counters and timestamps for the `status` command.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub notes_created: u64,
    pub menu_opened: u64,
    pub state_changes: u64,
    pub active_notes: usize,
    pub trashed_notes: usize,
    pub draft: Option<Draft>,
    pub total_starts: u64,
    pub app_state_changes: u64,
    pub last_start: Option<chrono::DateTime<chrono::Utc>>,
    pub last_sleep: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<DisplayNote>,
    pub draft: Option<Draft>,
    pub status: Option<StatusReport>,
    pub config: Option<NotasConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_notes(mut self, notes: Vec<DisplayNote>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_status(mut self, status: StatusReport) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_config(mut self, config: NotasConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use crate::screen::NotesScreen;
    use crate::session::SessionStore;
    use crate::store::mem_backend::MemBackend;
    use crate::store::note_store::NoteStore;
    use chrono::Utc;
    use std::rc::Rc;

    pub type TestScreen = NotesScreen<Rc<MemBackend>>;

    pub struct ScreenFixture {
        pub backend: Rc<MemBackend>,
    }

    impl Default for ScreenFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ScreenFixture {
        pub fn new() -> Self {
            Self {
                backend: Rc::new(MemBackend::new()),
            }
        }

        /// A fresh screen over the shared backend, as after a process restart.
        pub fn screen(&self) -> TestScreen {
            let notes = NoteStore::open(Rc::clone(&self.backend));
            let session = SessionStore::new(Rc::clone(&self.backend));
            NotesScreen::new(notes, session, Utc::now())
        }
    }
}
