//! # Notas CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! One invocation is one application launch. The CLI drives the same
//! checkpoints a mobile shell would, in order:
//!
//! ```text
//! start → appear → <one action> → disappear → sleep
//! ```
//!
//! so counters, drafts and notes behave across invocations exactly as they
//! would across app launches.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
