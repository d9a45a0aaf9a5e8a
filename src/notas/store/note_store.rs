use super::backend::{PrefValue, StorageBackend};
use crate::error::{NotasError, Result};
use crate::model::{is_blank, Note, NoteId, NoteInput, NoteState};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

/// Key prefix for persisted note records: `nota:<uuid>`.
pub const NOTE_KEY_PREFIX: &str = "nota:";

pub fn note_key(id: &NoteId) -> String {
    format!("{}{}", NOTE_KEY_PREFIX, id)
}

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub id: NoteId,
    pub created: bool,
}

/// The in-memory collection of notes, written through to a backend.
///
/// Every mutation is persisted *before* the in-memory record changes, so
/// a failed write leaves memory and storage agreeing.
pub struct NoteStore<B: StorageBackend> {
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    notes: Vec<Note>,
}

impl<B: StorageBackend> NoteStore<B> {
    /// Rebuilds the collection from every `nota:` key in the backend.
    /// Unreadable storage degrades to fewer (or no) notes, never an error.
    pub fn open(backend: B) -> Self {
        let keys = backend
            .keys_with_prefix(NOTE_KEY_PREFIX)
            .unwrap_or_else(|e| {
                warn!(error = %e, "note records unreadable, starting with none");
                Vec::new()
            });

        let mut notes = Vec::new();
        for key in keys {
            let value = match backend.get_value(&key) {
                Ok(value) => value,
                Err(e) => {
                    warn!(%key, error = %e, "skipping note record that could not be read");
                    continue;
                }
            };
            match value {
                Some(PrefValue::Text(raw)) => match serde_json::from_str::<Note>(&raw) {
                    Ok(note) if is_blank(&note.activity_text) => {
                        warn!(%key, "skipping persisted note with blank text");
                    }
                    Ok(note) => notes.push(note),
                    Err(e) => warn!(%key, error = %e, "skipping unreadable note record"),
                },
                Some(_) => warn!(%key, "skipping note record with non-text value"),
                None => {}
            }
        }
        sort_notes(&mut notes);
        debug!(count = notes.len(), "note store loaded");
        Self { backend, notes }
    }

    /// Creates a note when `input.id` is unset or unknown, otherwise
    /// overwrites text and urgency of the existing record. State is never
    /// touched here.
    pub fn upsert(&mut self, input: NoteInput, now: DateTime<Utc>) -> Result<Upserted> {
        if is_blank(&input.activity_text) {
            return Err(NotasError::Validation(
                "Note text cannot be empty".to_string(),
            ));
        }

        let existing = input
            .id
            .and_then(|id| self.notes.iter().position(|n| n.id == id));

        match existing {
            Some(pos) => {
                let mut note = self.notes[pos].clone();
                note.activity_text = input.activity_text;
                note.is_urgent = input.is_urgent;
                note.updated_at = now;
                self.persist(&note)?;
                let id = note.id;
                self.notes[pos] = note;
                debug!(%id, "note updated");
                Ok(Upserted { id, created: false })
            }
            None => {
                if let Some(unknown) = input.id {
                    debug!(%unknown, "upsert with unknown id, creating a new note");
                }
                let note = Note::new(input.activity_text, input.is_urgent, now);
                self.persist(&note)?;
                let id = note.id;
                self.notes.push(note);
                sort_notes(&mut self.notes);
                info!(%id, "note created");
                Ok(Upserted { id, created: true })
            }
        }
    }

    /// Active notes, oldest first.
    pub fn list_active(&self) -> Vec<Note> {
        self.list_by_state(NoteState::Active)
    }

    /// Trashed notes, oldest first.
    pub fn list_trashed(&self) -> Vec<Note> {
        self.list_by_state(NoteState::Trashed)
    }

    fn list_by_state(&self, state: NoteState) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|n| n.state == state)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| &n.id == id)
    }

    pub fn all(&self) -> &[Note] {
        &self.notes
    }

    /// Moves an active note to the trash. Returns `false` without touching
    /// storage when the id is unknown or already trashed.
    pub fn move_to_trash(&mut self, id: &NoteId, now: DateTime<Utc>) -> Result<bool> {
        let Some(pos) = self.notes.iter().position(|n| &n.id == id) else {
            debug!(%id, "trash requested for unknown note");
            return Ok(false);
        };
        if self.notes[pos].state == NoteState::Trashed {
            debug!(%id, "note already trashed");
            return Ok(false);
        }

        let mut note = self.notes[pos].clone();
        note.state = NoteState::Trashed;
        note.trashed_at = Some(now);
        self.persist(&note)?;
        self.notes[pos] = note;
        info!(%id, "note moved to trash");
        Ok(true)
    }

    fn persist(&self, note: &Note) -> Result<()> {
        let raw = serde_json::to_string(note).map_err(NotasError::Serialization)?;
        self.backend.set_value(&note_key(&note.id), PrefValue::Text(raw))
    }
}

fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}
