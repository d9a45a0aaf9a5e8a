use crate::commands::{CmdMessage, CmdResult};
use crate::model::NoteId;
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};
use tracing::warn;

/// Moves each note to the trash. Unknown or already-trashed ids are
/// skipped quietly; trashing twice is the same as trashing once.
pub fn run<B: StorageBackend>(
    screen: &mut NotesScreen<B>,
    ids: &[NoteId],
    now: DateTime<Utc>,
) -> CmdResult {
    let mut result = CmdResult::default();

    for id in ids {
        match screen.notes.move_to_trash(id, now) {
            Ok(true) => {
                if let Some(note) = screen.notes.get(id) {
                    result.add_message(CmdMessage::success(format!(
                        "Note moved to trash: {}",
                        note.activity_text
                    )));
                    result.affected_notes.push(note.clone());
                }
            }
            Ok(false) => {
                result.add_message(CmdMessage::info(format!("Nothing to trash for {}", id)));
            }
            Err(e) => {
                warn!(%id, error = %e, "note could not be trashed");
                result.add_message(CmdMessage::error(format!(
                    "Could not move note to trash: {}",
                    e
                )));
            }
        }
    }

    screen.state.touch(now);
    if !screen.save() {
        result.add_message(CmdMessage::warning("Session state could not be saved"));
    }

    result
}
