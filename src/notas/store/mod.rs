//! # Storage Layer
//!
//! Everything notas persists goes through one string-keyed scalar store, the
//! [`backend::StorageBackend`] trait. Session counters, the draft slot,
//! application counters and note records all live side by side in it under
//! different keys.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production file-based storage
//!   - All keys in one `preferences.json` object
//!   - Each write goes through a temp file + rename
//!
//! - [`mem_backend::MemBackend`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate read and write failures
//!
//! ## Note Records
//!
//! [`note_store::NoteStore`] keeps the notes in memory and writes each
//! mutation through to the backend as JSON text under `nota:<uuid>`. On
//! startup it rebuilds itself by enumerating that prefix, so nothing
//! beyond the key-value contract is needed for durability.
//!
//! ## Storage Format
//!
//! For `FsBackend`:
//! ```text
//! <data dir>/
//! ├── preferences.json    # every key: counters, draft, timestamps, nota:<uuid>
//! └── config.json         # NotasConfig
//! ```
//!
//! ## Sharing
//!
//! `Rc<B>` and `&B` are backends too. One backend per process is built at
//! startup and handed to each component that needs it.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod note_store;

pub use backend::{PrefValue, Preference, StorageBackend};
pub use note_store::{NoteStore, Upserted};
