use crate::commands::{CmdMessage, CmdResult};
use crate::model::Draft;
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};
use tracing::debug;

/// The input field changed. Saves immediately so a crash right after a
/// keystroke still finds the text; blank text clears the stored draft.
pub fn run<B: StorageBackend>(
    screen: &mut NotesScreen<B>,
    text: &str,
    is_urgent: bool,
    now: DateTime<Utc>,
) -> CmdResult {
    let mut result = CmdResult::default();

    screen.input = Draft::new(text, is_urgent);
    screen.has_unsaved_data = !screen.input.is_blank();
    screen.state.touch(now);

    let saved = screen.save();
    debug!(unsaved = screen.has_unsaved_data, saved, "input changed");

    if !saved {
        result.add_message(CmdMessage::warning("Draft could not be saved"));
    } else if screen.has_unsaved_data {
        result.draft = Some(screen.input.clone());
        result.add_message(CmdMessage::info("Draft saved"));
    } else {
        result.add_message(CmdMessage::info("Draft cleared"));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ScreenFixture;
    use crate::commands::lifecycle;
    use crate::session::keys;

    #[test]
    fn every_edit_is_written_through() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());

        for text in ["B", "Bu", "Buy", "Buy milk"] {
            run(&mut screen, text, false, Utc::now());
            assert_eq!(
                fixture.backend.get(keys::DRAFT_TEXT, String::new()).unwrap(),
                text
            );
        }
        assert!(screen.has_unsaved_data());
    }

    #[test]
    fn urgency_flag_is_kept_with_the_draft() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        run(&mut screen, "Pay rent", true, Utc::now());
        assert!(fixture.backend.get(keys::DRAFT_URGENT, false).unwrap());
    }

    #[test]
    fn clearing_the_field_removes_the_draft() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        run(&mut screen, "Buy milk", true, Utc::now());
        let result = run(&mut screen, "   ", true, Utc::now());

        assert!(!screen.has_unsaved_data());
        assert!(result.draft.is_none());
        assert!(!fixture.backend.contains(keys::DRAFT_TEXT).unwrap());
        assert!(!fixture.backend.contains(keys::DRAFT_URGENT).unwrap());
    }

    #[test]
    fn failed_draft_save_keeps_text_in_memory() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        fixture.backend.set_simulate_write_error(true);

        let result = run(&mut screen, "Buy milk", false, Utc::now());
        assert_eq!(result.messages[0].content, "Draft could not be saved");
        assert_eq!(screen.input().text, "Buy milk");
        assert!(screen.has_unsaved_data());
    }
}
