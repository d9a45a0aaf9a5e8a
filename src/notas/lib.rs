//! # Notas Architecture
//!
//! Notas is the persistence core of a single note-taking screen: a store of
//! short activity notes with an active/trashed lifecycle, plus the session
//! state (counters, last interaction, an unsaved draft) that has to survive
//! the process being suspended or killed at any moment.
//!
//! It is a library first. The bundled CLI replays one screen lifecycle per
//! invocation, which is enough to drive and inspect everything from a shell.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (display indexes → note ids)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Lifecycle checkpoints and user actions                   │
//! │  - Operates on the screen, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  State Layer (screen.rs, session.rs, app_state.rs)          │
//! │  - In-memory working state and its snapshot/restore rules   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - StorageBackend trait: a flat typed key-value store       │
//! │  - FsBackend (production), MemBackend (testing)             │
//! │  - NoteStore: notes written through as `nota:<uuid>` keys   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Durability Model
//!
//! Nothing is buffered. Every state-affecting action saves before it
//! returns, and every "becoming hidden" checkpoint saves again. If the
//! process dies between two actions, the next restore sees the result of
//! the last completed one.
//!
//! Storage failures never crash a checkpoint: they are logged through
//! `tracing` and the in-memory state stays authoritative.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): the bulk of the tests, over
//!    [`store::mem_backend::MemBackend`] shared through `Rc` so a "restart"
//!    is just a new screen over the same backend.
//! 2. **Stores** (`store/`, `session.rs`, `app_state.rs`): merge rules,
//!    malformed values, simulated read/write failures.
//! 3. **CLI** (`tests/`): whole-process runs against a temp data dir.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Checkpoints and actions
//! - [`screen`]: The screen's working state and menu state machine
//! - [`session`]: Session snapshot and restore
//! - [`app_state`]: Process start/sleep/resume counters
//! - [`store`]: Storage abstraction, backends and the note store
//! - [`model`]: Core data types (`Note`, `NoteId`, `Draft`)
//! - [`index`]: Display indexing (`1`, `t1` notation)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod app_state;
pub mod commands;
pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod screen;
pub mod session;
pub mod store;
