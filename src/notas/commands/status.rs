use crate::app_state::AppCounters;
use crate::commands::{CmdResult, StatusReport};
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;

/// Snapshot of the in-memory counters. Reads nothing from storage.
pub fn run<B: StorageBackend>(screen: &NotesScreen<B>, app: &AppCounters) -> CmdResult {
    let state = screen.state();
    let draft = (!screen.input.is_blank()).then(|| screen.input.clone());

    let report = StatusReport {
        notes_created: state.notes_created,
        menu_opened: state.menu_opened,
        state_changes: state.state_changes,
        active_notes: screen.notes.list_active().len(),
        trashed_notes: screen.notes.list_trashed().len(),
        draft,
        total_starts: app.total_starts,
        app_state_changes: app.state_changes,
        last_start: app.last_start,
        last_sleep: app.last_sleep,
    };

    CmdResult::default().with_status(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ScreenFixture;
    use crate::commands::{draft, lifecycle, menu, save_note};
    use chrono::Utc;

    #[test]
    fn reports_session_and_app_counters() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        save_note::run(&mut screen, None, "One", false, Utc::now()).unwrap();
        menu::toggle(&mut screen, Utc::now());
        draft::run(&mut screen, "Two", true, Utc::now());

        let app = AppCounters {
            total_starts: 4,
            state_changes: 9,
            ..Default::default()
        };
        let status = run(&screen, &app).status.unwrap();

        assert_eq!(status.notes_created, 1);
        assert_eq!(status.menu_opened, 1);
        assert_eq!(status.state_changes, 1);
        assert_eq!(status.active_notes, 1);
        assert_eq!(status.trashed_notes, 0);
        assert_eq!(status.draft.unwrap().text, "Two");
        assert_eq!(status.total_starts, 4);
        assert_eq!(status.app_state_changes, 9);
    }

    #[test]
    fn blank_input_is_no_draft() {
        let fixture = ScreenFixture::new();
        let screen = fixture.screen();
        let status = run(&screen, &AppCounters::default()).status.unwrap();
        assert!(status.draft.is_none());
    }
}
