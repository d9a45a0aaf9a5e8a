use crate::error::{NotasError, Result};
use crate::index::{index_notes, DisplayIndex, DisplayNote};
use crate::model::NoteId;
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;

pub fn indexed_notes<B: StorageBackend>(screen: &NotesScreen<B>) -> Vec<DisplayNote> {
    index_notes(screen.notes.all())
}

pub fn resolve_indexes<B: StorageBackend>(
    screen: &NotesScreen<B>,
    indexes: &[DisplayIndex],
) -> Result<Vec<(DisplayIndex, NoteId)>> {
    let indexed = indexed_notes(screen);

    indexes
        .iter()
        .map(|idx| {
            indexed
                .iter()
                .find(|dn| &dn.index == idx)
                .map(|dn| (*idx, dn.note.id))
                .ok_or_else(|| NotasError::Api(format!("Index {} not found", idx)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::ScreenFixture;
    use crate::model::NoteInput;
    use chrono::{Duration, Utc};

    #[test]
    fn resolves_positional_indexes() {
        let fixture = ScreenFixture::new();
        let mut screen = fixture.screen();
        let t0 = Utc::now();
        let a = screen.notes.upsert(NoteInput::new("a", false), t0).unwrap();
        let b = screen
            .notes
            .upsert(NoteInput::new("b", false), t0 + Duration::seconds(1))
            .unwrap();

        let resolved =
            resolve_indexes(&screen, &[DisplayIndex::Active(2), DisplayIndex::Active(1)]).unwrap();
        assert_eq!(resolved[0].1, b.id);
        assert_eq!(resolved[1].1, a.id);
    }

    #[test]
    fn unknown_index_is_an_api_error() {
        let fixture = ScreenFixture::new();
        let screen = fixture.screen();
        let err = resolve_indexes(&screen, &[DisplayIndex::Trashed(1)]).unwrap_err();
        assert!(matches!(err, NotasError::Api(_)));
    }
}
