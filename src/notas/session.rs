//! # Session State
//!
//! The screen keeps a handful of counters and a one-slot draft in memory.
//! [`SessionStore`] snapshots them into the key-value store and reads them
//! back, and is the single source of truth for what survives termination.
//!
//! ## Checkpoints
//!
//! - `restore` runs once per "becoming visible" transition, before
//!   anything else touches the working state.
//! - `save` runs on every "becoming hidden" / "navigating away" transition
//!   and after every state-affecting action (write-through, not batched).
//!
//! ## Reconciliation
//!
//! Each stored field is read with the in-memory value as its default, so a
//! fresh install comes back as zero counters and no draft. Counters never
//! regress: the larger of the stored and in-memory values wins, and any
//! increment the caller applies afterwards lands on top of it.
//!
//! ## Failure Handling
//!
//! Neither `restore` nor `save` returns an error. Storage failures are
//! logged and the in-memory value stays authoritative for the affected
//! field only.

use crate::error::Result;
use crate::model::{format_timestamp, parse_timestamp, Draft};
use crate::store::backend::{Preference, StorageBackend};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

pub mod keys {
    pub const NOTES_CREATED: &str = "notas_creadas";
    pub const MENU_OPENED: &str = "veces_menu_abierto";
    pub const LAST_INTERACTION: &str = "ultima_interaccion";
    pub const STATE_CHANGES: &str = "cambios_estado";
    pub const DRAFT_TEXT: &str = "draft_texto";
    pub const DRAFT_URGENT: &str = "draft_urgente";
}

pub const DEFAULT_LONG_ABSENCE_MINUTES: i64 = 5;
pub const DEFAULT_PREVIEW_CHARS: usize = 20;

/// In-memory session snapshot for one screen instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub notes_created: u64,
    pub menu_opened: u64,
    pub last_interaction: DateTime<Utc>,
    pub state_changes: u64,
    pub draft: Option<Draft>,
}

impl SessionState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            notes_created: 0,
            menu_opened: 0,
            last_interaction: now,
            state_changes: 0,
            draft: None,
        }
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_interaction = now;
    }
}

/// What `restore` hands back to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub struct Restored {
    pub state: SessionState,
    /// A non-blank draft was found in storage.
    pub has_unsaved_data: bool,
    /// Time since the stored last interaction, when one was readable.
    pub since_last_interaction: Option<Duration>,
    pub long_absence: bool,
}

impl Restored {
    /// Earlier sessions created at least one note.
    pub fn is_returning(&self) -> bool {
        self.state.notes_created > 0
    }
}

pub struct SessionStore<B: StorageBackend> {
    backend: B,
    long_absence: Duration,
    preview_chars: usize,
}

impl<B: StorageBackend> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            long_absence: Duration::minutes(DEFAULT_LONG_ABSENCE_MINUTES),
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    pub fn with_long_absence(mut self, threshold: Duration) -> Self {
        self.long_absence = threshold;
        self
    }

    pub fn with_preview_chars(mut self, chars: usize) -> Self {
        self.preview_chars = chars;
        self
    }

    pub fn restore(&self, current: &SessionState, now: DateTime<Utc>) -> Restored {
        let mut state = current.clone();

        state.notes_created = self.merge_counter(keys::NOTES_CREATED, current.notes_created);
        state.menu_opened = self.merge_counter(keys::MENU_OPENED, current.menu_opened);
        state.state_changes = self.merge_counter(keys::STATE_CHANGES, current.state_changes);

        let mut since_last_interaction = None;
        let raw_ts: String = self.read_or(keys::LAST_INTERACTION, String::new());
        if !raw_ts.trim().is_empty() {
            match parse_timestamp(&raw_ts) {
                Some(ts) => {
                    state.last_interaction = ts;
                    let elapsed = (now - ts).max(Duration::zero());
                    info!(
                        minutes = elapsed.num_seconds() as f64 / 60.0,
                        "last interaction restored"
                    );
                    since_last_interaction = Some(elapsed);
                }
                None => warn!(raw = %raw_ts, "ignoring malformed last interaction timestamp"),
            }
        }
        let long_absence = since_last_interaction.is_some_and(|d| d > self.long_absence);

        let mut has_unsaved_data = false;
        let draft_text: String = self.read_or(keys::DRAFT_TEXT, String::new());
        if !draft_text.trim().is_empty() {
            let draft = Draft::new(draft_text, self.read_or(keys::DRAFT_URGENT, false));
            info!(preview = %draft.preview(self.preview_chars), "draft recovered");
            state.draft = Some(draft);
            has_unsaved_data = true;
        }

        if state.notes_created > 0 {
            info!(
                notes_created = state.notes_created,
                "session restored from earlier runs"
            );
        } else {
            info!("first run or fresh session");
        }

        Restored {
            state,
            has_unsaved_data,
            since_last_interaction,
            long_absence,
        }
    }

    /// Writes the full snapshot. Returns whether every field reached storage.
    pub fn save(&self, state: &SessionState) -> bool {
        let results = [
            self.write(keys::NOTES_CREATED, state.notes_created),
            self.write(keys::MENU_OPENED, state.menu_opened),
            self.write(
                keys::LAST_INTERACTION,
                format_timestamp(state.last_interaction),
            ),
            self.write(keys::STATE_CHANGES, state.state_changes),
            self.save_draft(state.draft.as_ref()),
        ];

        let ok = results.iter().all(|r| r.is_ok());
        if ok {
            info!(
                notes_created = state.notes_created,
                state_changes = state.state_changes,
                "session state saved"
            );
        } else {
            warn!("session state only partially saved");
        }
        ok
    }

    fn save_draft(&self, draft: Option<&Draft>) -> Result<()> {
        match draft.filter(|d| !d.is_blank()) {
            Some(draft) => {
                self.write(keys::DRAFT_TEXT, draft.text.clone())?;
                self.write(keys::DRAFT_URGENT, draft.is_urgent)?;
                debug!(preview = %draft.preview(self.preview_chars), "draft saved");
                Ok(())
            }
            None => {
                let text = self.backend.remove(keys::DRAFT_TEXT);
                let urgent = self.backend.remove(keys::DRAFT_URGENT);
                for (key, res) in [(keys::DRAFT_TEXT, &text), (keys::DRAFT_URGENT, &urgent)] {
                    if let Err(e) = res {
                        warn!(key, error = %e, "failed to clear draft key");
                    }
                }
                text.and(urgent)
            }
        }
    }

    fn write<T: Preference>(&self, key: &str, value: T) -> Result<()> {
        self.backend.set(key, value).inspect_err(|e| {
            warn!(key, error = %e, "failed to save session field");
        })
    }

    fn read_or<T: Preference + Clone>(&self, key: &str, fallback: T) -> T {
        match self.backend.get(key, fallback.clone()) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "failed to read session field, keeping in-memory value");
                fallback
            }
        }
    }

    fn merge_counter(&self, key: &str, current: u64) -> u64 {
        let stored = self.read_or(key, current);
        if stored > current {
            debug!(key, stored, current, "stored counter is ahead of memory");
        }
        stored.max(current)
    }
}
