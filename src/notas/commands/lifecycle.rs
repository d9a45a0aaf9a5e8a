//! Screen-level checkpoints: becoming visible, becoming hidden, navigating away.

use crate::commands::{helpers::indexed_notes, CmdMessage, CmdResult};
use crate::index::DisplayIndex;
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Restore first, then count the visibility transition on top of the
/// restored counter, then persist.
pub fn appearing<B: StorageBackend>(
    screen: &mut NotesScreen<B>,
    now: DateTime<Utc>,
) -> CmdResult {
    let restored = screen.session.restore(&screen.state, now);
    let mut result = CmdResult::default();

    if restored.has_unsaved_data {
        if let Some(draft) = &restored.state.draft {
            screen.input = draft.clone();
            screen.has_unsaved_data = true;
            result.draft = Some(draft.clone());
            result.add_message(CmdMessage::info(format!(
                "Draft recovered: {}",
                draft.preview(40)
            )));
        }
    }

    if restored.long_absence {
        if let Some(away) = restored.since_last_interaction {
            result.add_message(CmdMessage::info(format!(
                "Welcome back, last activity {} minutes ago",
                away.num_minutes()
            )));
        }
    }

    if restored.is_returning() {
        result.add_message(CmdMessage::info(format!(
            "Session restored: {} notes created so far",
            restored.state.notes_created
        )));
    } else {
        result.add_message(CmdMessage::info("Starting a new session"));
    }

    screen.state = restored.state;
    screen.state.state_changes += 1;
    info!(state_changes = screen.state.state_changes, "screen appearing");

    if !screen.save() {
        result.add_message(CmdMessage::warning("Session state could not be saved"));
    }

    let active = indexed_notes(screen)
        .into_iter()
        .filter(|dn| matches!(dn.index, DisplayIndex::Active(_)))
        .collect();
    result.with_listed_notes(active)
}

pub fn disappearing<B: StorageBackend>(screen: &mut NotesScreen<B>) -> CmdResult {
    info!("screen disappearing");
    let mut result = CmdResult::default();
    if !screen.save() {
        result.add_message(CmdMessage::warning("Session state could not be saved"));
    }
    result
}

pub fn navigating_from<B: StorageBackend>(screen: &mut NotesScreen<B>) -> CmdResult {
    info!("navigating away from screen");
    let mut result = CmdResult::default();
    if !screen.save() {
        result.add_message(CmdMessage::warning("Session state could not be saved"));
    }
    if screen.has_unsaved_data && !screen.input.is_blank() {
        warn!("leaving screen with unsaved note text");
        result.add_message(CmdMessage::warning(
            "There is unsaved text in the note field",
        ));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ScreenFixture;
    use crate::commands::{draft, save_note};
    use crate::model::Draft;
    use crate::session::keys;

    #[test]
    fn fresh_install_appears_with_zero_counters() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        let result = appearing(&mut screen, Utc::now());

        assert_eq!(screen.state().notes_created, 0);
        assert_eq!(screen.state().menu_opened, 0);
        assert_eq!(screen.state().state_changes, 1);
        assert!(!screen.has_unsaved_data());
        assert!(result.draft.is_none());
        assert!(result.listed_notes.is_empty());
    }

    #[test]
    fn state_changes_accumulate_across_restarts() {
        let fixture = ScreenFixture::new();
        for expected in 1..=3 {
            let mut screen = fixture.screen();
            appearing(&mut screen, Utc::now());
            disappearing(&mut screen);
            assert_eq!(screen.state().state_changes, expected);
        }
        assert_eq!(fixture.backend.get(keys::STATE_CHANGES, 0i64).unwrap(), 3);
    }

    #[test]
    fn reappearing_counts_again_without_double_restore_effects() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        appearing(&mut screen, Utc::now());
        disappearing(&mut screen);
        appearing(&mut screen, Utc::now());
        assert_eq!(screen.state().state_changes, 2);
    }

    #[test]
    fn typed_draft_is_back_after_restart() {
        let fixture = ScreenFixture::new();
        {
            let mut screen = fixture.screen();
            appearing(&mut screen, Utc::now());
            draft::run(&mut screen, "Buy milk", false, Utc::now());
            // process killed here: no disappearing checkpoint
        }

        let mut screen = fixture.screen();
        let result = appearing(&mut screen, Utc::now());
        assert_eq!(result.draft, Some(Draft::new("Buy milk", false)));
        assert_eq!(screen.input(), &Draft::new("Buy milk", false));
        assert!(screen.has_unsaved_data());
    }

    #[test]
    fn appearing_lists_only_active_notes() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        appearing(&mut screen, Utc::now());
        save_note::run(&mut screen, None, "One", false, Utc::now()).unwrap();
        save_note::run(&mut screen, None, "Two", true, Utc::now()).unwrap();
        let id = screen
            .notes
            .list_active()
            .into_iter()
            .find(|n| n.activity_text == "One")
            .unwrap()
            .id;
        screen.notes.move_to_trash(&id, Utc::now()).unwrap();

        let result = appearing(&mut screen, Utc::now());
        assert_eq!(result.listed_notes.len(), 1);
        assert_eq!(result.listed_notes[0].note.activity_text, "Two");
    }

    #[test]
    fn navigating_away_warns_about_unsaved_text() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        appearing(&mut screen, Utc::now());
        draft::run(&mut screen, "half a thought", false, Utc::now());

        let result = navigating_from(&mut screen);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.contains("unsaved text")));
        assert!(fixture.backend.contains(keys::DRAFT_TEXT).unwrap());
    }

    #[test]
    fn hide_checkpoint_survives_storage_failure() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        appearing(&mut screen, Utc::now());

        fixture.backend.set_simulate_write_error(true);
        let result = disappearing(&mut screen);
        assert_eq!(result.messages.len(), 1);
        assert_eq!(screen.state().state_changes, 1);
    }
}
