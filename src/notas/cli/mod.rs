//! # CLI Behavior
//!
//! One possible UI client for notas. The CLI is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Context
//!
//! - Data directory: `--data-dir`, else `NOTAS_HOME`, else the platform
//!   data dir.
//! - Logging: `tracing` to stderr, filtered by `RUST_LOG`, defaulting to
//!   `warn` (`debug` with `-v`).
//!
//! ## Lifecycle Output
//!
//! Checkpoint messages (session restored, draft recovered, …) are printed
//! only with `-v`, except warnings and errors, which always show.
//!
//! ## Structure
//!
//! - `setup.rs`: clap argument definitions
//! - `commands.rs`: context wiring, lifecycle replay and per-command handlers
//! - `render.rs`: turning `CmdResult` values into terminal output

mod commands;
mod render;
mod setup;

pub use commands::run;
