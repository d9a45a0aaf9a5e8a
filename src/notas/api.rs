//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for every notas operation, whichever UI drives it.
//!
//! The facade:
//! - **Owns** the screen and the app-level lifecycle store
//! - **Dispatches** each call to its command function with the current time
//! - **Normalizes inputs** (display indexes such as `2` or `t1` become note ids)
//!
//! It does no business logic, no I/O and no formatting.
//!
//! ## Generic Over StorageBackend
//!
//! `NotasApi<B>` needs a backend that can be handed to several owners at
//! once, so `B: Clone`. Production uses `Rc<FsBackend>`, tests use
//! `Rc<MemBackend>`; both clone the pointer, not the data.

use crate::app_state::AppStateStore;
use crate::commands;
use crate::config::NotasConfig;
use crate::error::{NotasError, Result};
use crate::index::DisplayIndex;
use crate::screen::{MenuState, NotesScreen};
use crate::session::SessionStore;
use crate::store::backend::StorageBackend;
use crate::store::note_store::NoteStore;
use chrono::Utc;
use std::str::FromStr;

pub struct NotasApi<B: StorageBackend + Clone> {
    screen: NotesScreen<B>,
    app: AppStateStore<B>,
    paths: commands::NotasPaths,
}

impl<B: StorageBackend + Clone> NotasApi<B> {
    /// Loads persisted notes. Session state is not read until [`appear`].
    /// Unreadable storage starts an empty screen rather than failing.
    ///
    /// [`appear`]: NotasApi::appear
    pub fn new(backend: B, config: &NotasConfig, paths: commands::NotasPaths) -> Self {
        let notes = NoteStore::open(backend.clone());
        let session = SessionStore::new(backend.clone())
            .with_long_absence(config.long_absence())
            .with_preview_chars(config.draft_preview_chars);
        let app = AppStateStore::new(backend).with_long_absence(config.long_absence());

        Self {
            screen: NotesScreen::new(notes, session, Utc::now()),
            app,
            paths,
        }
    }

    pub fn start(&mut self) -> commands::CmdResult {
        commands::app::start(&mut self.app, Utc::now())
    }

    pub fn sleep(&mut self) -> commands::CmdResult {
        commands::app::sleep(&mut self.app, Utc::now())
    }

    pub fn resume(&mut self) -> commands::CmdResult {
        commands::app::resume(&mut self.app, Utc::now())
    }

    pub fn appear(&mut self) -> commands::CmdResult {
        commands::lifecycle::appearing(&mut self.screen, Utc::now())
    }

    pub fn disappear(&mut self) -> commands::CmdResult {
        commands::lifecycle::disappearing(&mut self.screen)
    }

    pub fn navigate_away(&mut self) -> commands::CmdResult {
        commands::lifecycle::navigating_from(&mut self.screen)
    }

    pub fn add_note(&mut self, text: &str, is_urgent: bool) -> Result<commands::CmdResult> {
        commands::save_note::run(&mut self.screen, None, text, is_urgent, Utc::now())
    }

    pub fn update_note(
        &mut self,
        index: &str,
        text: &str,
        is_urgent: bool,
    ) -> Result<commands::CmdResult> {
        let indexes = parse_indexes(&[index])?;
        let resolved = commands::helpers::resolve_indexes(&self.screen, &indexes)?;
        let id = resolved.first().map(|(_, id)| *id);
        commands::save_note::run(&mut self.screen, id, text, is_urgent, Utc::now())
    }

    pub fn trash_notes<I: AsRef<str>>(&mut self, indexes: &[I]) -> Result<commands::CmdResult> {
        let indexes = parse_indexes(indexes)?;
        let ids: Vec<_> = commands::helpers::resolve_indexes(&self.screen, &indexes)?
            .into_iter()
            .map(|(_, id)| id)
            .collect();
        Ok(commands::trash::run(&mut self.screen, &ids, Utc::now()))
    }

    pub fn edit_draft(&mut self, text: &str, is_urgent: bool) -> commands::CmdResult {
        commands::draft::run(&mut self.screen, text, is_urgent, Utc::now())
    }

    pub fn toggle_menu(&mut self) -> (MenuToggle, commands::CmdResult) {
        commands::menu::toggle(&mut self.screen, Utc::now())
    }

    pub fn finish_menu_transition(&mut self) -> MenuState {
        commands::menu::finish_transition(&mut self.screen)
    }

    pub fn close_menu(&mut self) -> MenuState {
        commands::menu::close(&mut self.screen)
    }

    pub fn list_notes(&self, filter: NoteFilter) -> commands::CmdResult {
        commands::list::run(&self.screen, filter)
    }

    pub fn status(&self) -> commands::CmdResult {
        commands::status::run(&self.screen, self.app.counters())
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn screen(&self) -> &NotesScreen<B> {
        &self.screen
    }

    pub fn paths(&self) -> &commands::NotasPaths {
        &self.paths
    }
}

fn parse_indexes<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<DisplayIndex>> {
    inputs
        .iter()
        .map(|s| DisplayIndex::from_str(s.as_ref()).map_err(NotasError::Api))
        .collect()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::NoteFilter;
pub use crate::commands::menu::MenuToggle;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, NotasPaths, StatusReport};
