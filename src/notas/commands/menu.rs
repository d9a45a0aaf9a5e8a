//! Side menu toggling.
//!
//! The slide/fade animation itself is the UI's business. What lives here is
//! the rule that a toggle arriving while the previous one is still
//! animating does not race it: it only reports where the menu is going.

use crate::commands::{CmdMessage, CmdResult};
use crate::screen::{MenuState, NotesScreen};
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuToggle {
    /// A transition started. `opening` tells which way.
    Started { opening: bool, times_toggled: u64 },
    /// A transition was already running; nothing changed.
    InFlight { is_open: bool },
}

pub fn toggle<B: StorageBackend>(
    screen: &mut NotesScreen<B>,
    now: DateTime<Utc>,
) -> (MenuToggle, CmdResult) {
    let mut result = CmdResult::default();

    if screen.menu.in_flight() {
        let is_open = screen.menu.is_open();
        debug!(is_open, "menu toggle ignored while animating");
        return (MenuToggle::InFlight { is_open }, result);
    }

    let opening = screen.menu == MenuState::Closed;
    screen.menu = if opening {
        MenuState::Opening
    } else {
        MenuState::Closing
    };
    screen.state.menu_opened += 1;
    screen.state.touch(now);

    info!(
        opening,
        times = screen.state.menu_opened,
        "menu toggled"
    );

    if !screen.save() {
        result.add_message(CmdMessage::warning("Session state could not be saved"));
    }
    result.add_message(CmdMessage::info(format!(
        "Menu {} (toggled {} times)",
        if opening { "opened" } else { "closed" },
        screen.state.menu_opened
    )));

    (
        MenuToggle::Started {
            opening,
            times_toggled: screen.state.menu_opened,
        },
        result,
    )
}

/// The running animation finished.
pub fn finish_transition<B: StorageBackend>(screen: &mut NotesScreen<B>) -> MenuState {
    screen.menu = screen.menu.settled();
    debug!(menu = ?screen.menu, "menu transition finished");
    screen.menu
}

/// Overlay tap or picking the current page: close without counting a toggle.
pub fn close<B: StorageBackend>(screen: &mut NotesScreen<B>) -> MenuState {
    if screen.menu.is_open() {
        screen.menu = MenuState::Closing;
    }
    screen.menu
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ScreenFixture;
    use crate::commands::lifecycle;
    use crate::session::keys;

    #[test]
    fn toggle_opens_then_closes() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());

        let (first, _) = toggle(&mut screen, Utc::now());
        assert_eq!(
            first,
            MenuToggle::Started {
                opening: true,
                times_toggled: 1
            }
        );
        assert_eq!(finish_transition(&mut screen), MenuState::Open);

        let (second, _) = toggle(&mut screen, Utc::now());
        assert_eq!(
            second,
            MenuToggle::Started {
                opening: false,
                times_toggled: 2
            }
        );
        assert_eq!(finish_transition(&mut screen), MenuState::Closed);
        assert_eq!(fixture.backend.get(keys::MENU_OPENED, 0i64).unwrap(), 2);
    }

    #[test]
    fn toggle_while_animating_is_a_query() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        toggle(&mut screen, Utc::now());

        let (again, result) = toggle(&mut screen, Utc::now());
        assert_eq!(again, MenuToggle::InFlight { is_open: true });
        assert!(result.messages.is_empty());
        assert_eq!(screen.state().menu_opened, 1);
        assert_eq!(screen.menu(), MenuState::Opening);
    }

    #[test]
    fn counter_survives_restart() {
        let fixture = ScreenFixture::new();
        {
            let mut screen = fixture.screen();
            lifecycle::appearing(&mut screen, Utc::now());
            toggle(&mut screen, Utc::now());
        }
        let mut screen = fixture.screen();
        lifecycle::appearing(&mut screen, Utc::now());
        assert_eq!(screen.state().menu_opened, 1);
        assert_eq!(screen.menu(), MenuState::Closed);
    }

    #[test]
    fn close_does_not_count() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        toggle(&mut screen, Utc::now());
        finish_transition(&mut screen);

        assert_eq!(close(&mut screen), MenuState::Closing);
        assert_eq!(finish_transition(&mut screen), MenuState::Closed);
        assert_eq!(close(&mut screen), MenuState::Closed);
        assert_eq!(screen.state().menu_opened, 1);
    }
}
