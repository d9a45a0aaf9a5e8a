use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a note record. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteState {
    Active,
    Trashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub activity_text: String,
    pub is_urgent: bool,
    pub state: NoteState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub trashed_at: Option<DateTime<Utc>>,
}

impl Note {
    pub fn new(activity_text: String, is_urgent: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: NoteId::new(),
            activity_text,
            is_urgent,
            state: NoteState::Active,
            created_at: now,
            updated_at: now,
            trashed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == NoteState::Active
    }
}

/// What a caller hands to `upsert`. `id: None` means "create".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInput {
    pub id: Option<NoteId>,
    pub activity_text: String,
    pub is_urgent: bool,
}

impl NoteInput {
    pub fn new(activity_text: impl Into<String>, is_urgent: bool) -> Self {
        Self {
            id: None,
            activity_text: activity_text.into(),
            is_urgent,
        }
    }

    pub fn with_id(mut self, id: NoteId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Uncommitted contents of the note input field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub text: String,
    pub is_urgent: bool,
}

impl Draft {
    pub fn new(text: impl Into<String>, is_urgent: bool) -> Self {
        Self {
            text: text.into(),
            is_urgent,
        }
    }

    pub fn is_blank(&self) -> bool {
        is_blank(&self.text)
    }

    /// First `max_chars` characters, for log lines.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.text.chars().take(max_chars).collect();
        if self.text.chars().count() > max_chars {
            preview.push('…');
        }
        preview
    }
}

pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// ISO-8601 text as persisted in the key-value store.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parses a persisted timestamp. Anything unreadable counts as absent.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_roundtrips_through_text() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap();
        assert_eq!(parse_timestamp(&format_timestamp(ts)), Some(ts));
    }

    #[test]
    fn timestamp_keeps_sub_millisecond_precision() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap()
            + chrono::Duration::nanoseconds(953_011_979);
        let text = format_timestamp(ts);
        assert_eq!(text, "2024-03-09T14:30:05.953011979Z");
        assert_eq!(parse_timestamp(&text), Some(ts));
    }

    #[test]
    fn timestamp_with_offset_is_normalized_to_utc() {
        let parsed = parse_timestamp("2024-03-09T16:30:05+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 5).unwrap());
    }

    #[test]
    fn malformed_timestamp_is_absent() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("09/03/2024 14:30"), None);
    }

    #[test]
    fn draft_blankness() {
        assert!(Draft::new("   \t\n", true).is_blank());
        assert!(Draft::default().is_blank());
        assert!(!Draft::new(" x ", false).is_blank());
    }

    #[test]
    fn draft_preview_truncates_on_chars() {
        let draft = Draft::new("Comprar leche y pan mañana temprano", false);
        assert_eq!(draft.preview(6), "Compra…");
        assert_eq!(Draft::new("corto", false).preview(20), "corto");
    }

    #[test]
    fn new_note_is_active() {
        let note = Note::new("Call mom".into(), true, Utc::now());
        assert!(note.is_active());
        assert!(note.trashed_at.is_none());
        assert_eq!(note.created_at, note.updated_at);
    }
}
