use crate::commands::CmdResult;
use crate::index::DisplayIndex;
use crate::screen::NotesScreen;
use crate::store::backend::StorageBackend;

use super::helpers::indexed_notes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteFilter {
    #[default]
    Active,
    Trashed,
}

pub fn run<B: StorageBackend>(screen: &NotesScreen<B>, filter: NoteFilter) -> CmdResult {
    let notes = indexed_notes(screen);
    let listed: Vec<_> = match filter {
        NoteFilter::Active => notes
            .into_iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Active(_)))
            .collect(),
        NoteFilter::Trashed => notes
            .into_iter()
            .filter(|dn| matches!(dn.index, DisplayIndex::Trashed(_)))
            .collect(),
    };

    CmdResult::default().with_listed_notes(listed)
}
