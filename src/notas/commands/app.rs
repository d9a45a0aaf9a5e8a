//! Process-level checkpoints: cold start, entering background, resuming.

use crate::app_state::AppStateStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::store::backend::StorageBackend;
use chrono::{DateTime, Utc};

pub fn start<B: StorageBackend>(app: &mut AppStateStore<B>, now: DateTime<Utc>) -> CmdResult {
    let counters = app.on_start(now);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "App started ({} starts so far)",
        counters.total_starts
    )));
    result
}

pub fn sleep<B: StorageBackend>(app: &mut AppStateStore<B>, now: DateTime<Utc>) -> CmdResult {
    let mut result = CmdResult::default();
    if !app.on_sleep(now) {
        result.add_message(CmdMessage::warning("App state could not be saved"));
    }
    result
}

pub fn resume<B: StorageBackend>(app: &mut AppStateStore<B>, now: DateTime<Utc>) -> CmdResult {
    let report = app.on_resume(now);
    let mut result = CmdResult::default();
    match report.background_duration {
        Some(away) if report.long_absence => {
            result.add_message(CmdMessage::info(format!(
                "Back after {} minutes in the background",
                away.num_minutes()
            )));
        }
        Some(away) => {
            result.add_message(CmdMessage::info(format!(
                "Resumed after {} seconds",
                away.num_seconds()
            )));
        }
        None => result.add_message(CmdMessage::info("Resumed")),
    }
    result
}
