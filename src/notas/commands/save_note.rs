use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotasError, Result};
use crate::model::{is_blank, Draft, NoteId, NoteInput};
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Commits the input as a note (new when `id` is `None`, otherwise an
/// edit of that note). Blank text is rejected before anything is touched.
pub fn run<B: StorageBackend>(
    screen: &mut NotesScreen<B>,
    id: Option<NoteId>,
    text: &str,
    is_urgent: bool,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    if is_blank(text) {
        warn!("attempted to save a note without text");
        return Err(NotasError::Validation(
            "Please write an activity".to_string(),
        ));
    }

    let mut result = CmdResult::default();
    let input = NoteInput {
        id,
        activity_text: text.to_string(),
        is_urgent,
    };

    let upserted = match screen.notes.upsert(input, now) {
        Ok(up) => up,
        Err(e) if e.is_storage() => {
            warn!(error = %e, "note could not be stored");
            result.add_message(CmdMessage::error(format!("Could not save note: {}", e)));
            return Ok(result);
        }
        Err(e) => return Err(e),
    };

    if upserted.created {
        screen.state.notes_created += 1;
    }
    screen.state.touch(now);
    screen.has_unsaved_data = false;
    screen.input = Draft::default();

    if !screen.save() {
        result.add_message(CmdMessage::warning("Session state could not be saved"));
    }

    if let Some(note) = screen.notes.get(&upserted.id) {
        result.affected_notes.push(note.clone());
    }

    if upserted.created {
        info!(
            number = screen.state.notes_created,
            urgent = is_urgent,
            "note saved"
        );
        result.add_message(CmdMessage::success(format!(
            "Note saved. Notes this session: {}",
            screen.state.notes_created
        )));
    } else {
        info!(id = %upserted.id, urgent = is_urgent, "note updated");
        result.add_message(CmdMessage::success("Note updated"));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ScreenFixture;
    use crate::commands::{draft, lifecycle};
    use crate::model::NoteState;
    use crate::session::keys;

    #[test]
    fn creating_counts_and_lists_the_note() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());

        let result = run(&mut screen, None, "Call mom", true, Utc::now()).unwrap();
        assert_eq!(screen.state().notes_created, 1);
        assert_eq!(result.affected_notes.len(), 1);

        let active = screen.notes().list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].activity_text, "Call mom");
        assert!(active[0].is_urgent);
        assert_eq!(active[0].state, NoteState::Active);

        assert_eq!(fixture.backend.get(keys::NOTES_CREATED, 0i64).unwrap(), 1);
    }

    #[test]
    fn blank_text_is_rejected_and_nothing_changes() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        let before = fixture.backend.len();

        let err = run(&mut screen, None, "  \n", false, Utc::now()).unwrap_err();
        assert!(matches!(err, NotasError::Validation(_)));
        assert_eq!(screen.state().notes_created, 0);
        assert_eq!(fixture.backend.len(), before);
    }

    #[test]
    fn saving_clears_input_and_stored_draft() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        draft::run(&mut screen, "Buy milk", true, Utc::now());
        assert!(fixture.backend.contains(keys::DRAFT_TEXT).unwrap());

        run(&mut screen, None, "Buy milk", true, Utc::now()).unwrap();
        assert!(screen.input().is_blank());
        assert!(!screen.has_unsaved_data());
        assert!(!fixture.backend.contains(keys::DRAFT_TEXT).unwrap());
        assert!(!fixture.backend.contains(keys::DRAFT_URGENT).unwrap());
    }

    #[test]
    fn editing_does_not_count_as_creation() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        run(&mut screen, None, "Draft plan", false, Utc::now()).unwrap();
        let id = screen.notes().list_active()[0].id;

        run(&mut screen, Some(id), "Final plan", true, Utc::now()).unwrap();
        assert_eq!(screen.state().notes_created, 1);
        let active = screen.notes().list_active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].activity_text, "Final plan");
    }

    #[test]
    fn counter_continues_from_previous_session() {
        let fixture = ScreenFixture::new();
        fixture.backend.set(keys::NOTES_CREATED, 5i64).unwrap();

        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        assert_eq!(screen.state().notes_created, 5);

        run(&mut screen, None, "Sixth", false, Utc::now()).unwrap();
        assert_eq!(fixture.backend.get(keys::NOTES_CREATED, 0i64).unwrap(), 6);
    }

    #[test]
    fn storage_failure_is_reported_not_raised() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        fixture.backend.set_simulate_write_error(true);

        let result = run(&mut screen, None, "Lost", false, Utc::now()).unwrap();
        assert!(result.has_errors());
        assert_eq!(screen.state().notes_created, 0);
        assert!(screen.notes().list_active().is_empty());
    }
}
