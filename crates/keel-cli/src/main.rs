//! keel CLI - keep a local branch in sync with its remote.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod prompt;

use commands::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    output::set_quiet(cli.quiet);
    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Sync { branches, dry_run } => commands::sync::run(&branches, dry_run),
        Commands::Status { json } => commands::status::run(json),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Log to stderr so events never interleave with git's own output on stdout.
fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
