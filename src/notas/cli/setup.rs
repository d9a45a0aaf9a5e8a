use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// "0.3.2" for releases, "0.3.2@abc1234" for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("NOTAS_GIT_HASH");
    const IS_RELEASE: &str = env!("NOTAS_IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notas", bin_name = "notas", version = get_version())]
#[command(about = "Activity notes with a session that survives restarts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (lifecycle messages, debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding preferences.json and config.json
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a new note
    #[command(alias = "a")]
    Add {
        /// Activity text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Mark the note as urgent
        #[arg(short, long)]
        urgent: bool,
    },

    /// Replace the text of an existing note
    #[command(alias = "u")]
    Update {
        /// Display index (e.g. 1 or t2)
        index: String,

        /// New activity text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Mark the note as urgent
        #[arg(short, long)]
        urgent: bool,
    },

    /// List notes
    #[command(alias = "ls")]
    List {
        /// Show trashed notes instead of active ones
        #[arg(short, long)]
        trashed: bool,
    },

    /// Move notes to the trash
    #[command(alias = "rm")]
    Trash {
        /// Display indexes (e.g. 1 3)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Show, set or clear the unsaved draft
    Draft {
        /// Draft text; omit to show the current draft
        text: Vec<String>,

        /// Mark the draft as urgent
        #[arg(short, long)]
        urgent: bool,

        /// Clear the stored draft
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },

    /// Toggle the side menu
    Menu,

    /// Show session and app counters
    Status,

    /// Get or set configuration
    Config {
        /// Configuration key (long-absence-minutes, draft-preview-chars)
        key: Option<String>,

        /// Value to set
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_urgent_flag() {
        let cli = Cli::try_parse_from(["notas", "add", "Call", "mom", "--urgent"]).unwrap();
        match cli.command {
            Some(Commands::Add { text, urgent }) => {
                assert_eq!(text, vec!["Call", "mom"]);
                assert!(urgent);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_requires_text() {
        assert!(Cli::try_parse_from(["notas", "add"]).is_err());
    }

    #[test]
    fn draft_clear_conflicts_with_text() {
        assert!(Cli::try_parse_from(["notas", "draft", "x", "--clear"]).is_err());
        assert!(Cli::try_parse_from(["notas", "draft", "--clear"]).is_ok());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli =
            Cli::try_parse_from(["notas", "list", "--trashed", "-v", "--data-dir", "/tmp/x"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(cli.command, Some(Commands::List { trashed: true })));
    }
}
