//! Application-level lifecycle counters.
//!
//! Separate from the screen's session state: these track cold starts and
//! start/sleep/resume transitions for the whole process. The sleep
//! checkpoint is the one that must persist, since the OS may kill the
//! process right after it without further notice.

use crate::model::{format_timestamp, parse_timestamp};
use crate::store::backend::{Preference, StorageBackend};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

pub mod keys {
    pub const LAST_START: &str = "app_ultimo_inicio";
    pub const TOTAL_STARTS: &str = "app_total_inicios";
    pub const LAST_SLEEP: &str = "app_ultimo_sleep";
    pub const STATE_CHANGES: &str = "app_estados_cambiados";
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppCounters {
    pub total_starts: u64,
    pub state_changes: u64,
    pub last_start: Option<DateTime<Utc>>,
    pub last_sleep: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeReport {
    /// `now - last sleep`, when a readable sleep timestamp exists.
    pub background_duration: Option<Duration>,
    pub long_absence: bool,
    pub state_changes: u64,
}

pub struct AppStateStore<B: StorageBackend> {
    backend: B,
    counters: AppCounters,
    long_absence: Duration,
}

impl<B: StorageBackend> AppStateStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            counters: AppCounters::default(),
            long_absence: Duration::minutes(crate::session::DEFAULT_LONG_ABSENCE_MINUTES),
        }
    }

    pub fn with_long_absence(mut self, threshold: Duration) -> Self {
        self.long_absence = threshold;
        self
    }

    pub fn counters(&self) -> &AppCounters {
        &self.counters
    }

    /// Cold start. Counts the start and stamps its time.
    pub fn on_start(&mut self, now: DateTime<Utc>) -> &AppCounters {
        self.reload();
        self.counters.state_changes += 1;
        self.counters.total_starts += 1;
        self.counters.last_start = Some(now);

        self.write(keys::LAST_START, format_timestamp(now));
        self.write(keys::TOTAL_STARTS, self.counters.total_starts);

        info!(
            total_starts = self.counters.total_starts,
            state_changes = self.counters.state_changes,
            "app started"
        );
        &self.counters
    }

    /// Entering background. Everything here must reach storage.
    pub fn on_sleep(&mut self, now: DateTime<Utc>) -> bool {
        self.counters.state_changes += 1;
        self.counters.last_sleep = Some(now);

        let ok = self.write(keys::LAST_SLEEP, format_timestamp(now))
            & self.write(keys::STATE_CHANGES, self.counters.state_changes);

        if ok {
            info!(
                state_changes = self.counters.state_changes,
                "app entering background, state saved"
            );
        } else {
            warn!("app entering background, state not fully saved");
        }
        ok
    }

    /// Back from background. Restored counters win, then this transition
    /// is counted on top.
    pub fn on_resume(&mut self, now: DateTime<Utc>) -> ResumeReport {
        self.reload();
        self.counters.state_changes += 1;

        let background_duration = self
            .counters
            .last_sleep
            .map(|slept| (now - slept).max(Duration::zero()));
        let long_absence = background_duration.is_some_and(|d| d > self.long_absence);

        match background_duration {
            Some(d) => info!(
                seconds = d.num_milliseconds() as f64 / 1000.0,
                long_absence, "app resumed"
            ),
            None => info!("app resumed, no previous sleep recorded"),
        }

        ResumeReport {
            background_duration,
            long_absence,
            state_changes: self.counters.state_changes,
        }
    }

    /// Merges stored values into memory. Counters never go backwards.
    pub fn reload(&mut self) -> &AppCounters {
        let stored_starts = self.read_or(keys::TOTAL_STARTS, self.counters.total_starts);
        let stored_changes = self.read_or(keys::STATE_CHANGES, self.counters.state_changes);
        self.counters.total_starts = self.counters.total_starts.max(stored_starts);
        self.counters.state_changes = self.counters.state_changes.max(stored_changes);

        if let Some(ts) = self.read_timestamp(keys::LAST_START) {
            self.counters.last_start = Some(ts);
        }
        if let Some(ts) = self.read_timestamp(keys::LAST_SLEEP) {
            self.counters.last_sleep = Some(ts);
        }
        &self.counters
    }

    fn read_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        let raw: String = self.read_or(key, String::new());
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = parse_timestamp(&raw);
        if parsed.is_none() {
            warn!(key, raw = %raw, "ignoring malformed app timestamp");
        }
        parsed
    }

    fn read_or<T: Preference + Clone>(&self, key: &str, fallback: T) -> T {
        self.backend
            .get(key, fallback.clone())
            .unwrap_or_else(|e| {
                warn!(key, error = %e, "failed to read app state");
                fallback
            })
    }

    fn write<T: Preference>(&self, key: &str, value: T) -> bool {
        match self.backend.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key, error = %e, "failed to save app state");
                false
            }
        }
    }
}
