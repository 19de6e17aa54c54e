//! Command table and handlers.

use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub mod completions;
pub mod status;
pub mod sync;
pub mod utils;

/// keel - keep a local branch in sync with its remote.
#[derive(Parser)]
#[command(name = "keel", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synchronize local changes with origin or a specified branch
    #[command(after_help = "Examples:\n  keel sync\n  keel sync origin master\n  keel sync local-branch")]
    Sync {
        /// Branch to sync against afterwards. When the current branch is not ahead of its
        /// remote, all arguments are also passed as-is to `git pull --rebase`
        branches: Vec<String>,

        /// Show what would run without fetching or changing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how the current branch relates to its remote
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sync_accepts_extra_arguments() {
        let cli = Cli::try_parse_from(["keel", "sync", "origin", "master"])
            .unwrap_or_else(|e| panic!("{e}"));
        match cli.command {
            Commands::Sync { branches, dry_run } => {
                assert_eq!(branches, vec!["origin", "master"]);
                assert!(!dry_run);
            }
            _ => panic!("expected sync"),
        }
    }
}
