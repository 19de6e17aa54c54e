//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use keel_git::RemoteDivergence;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print the detached HEAD guidance (always to stderr).
pub fn error_detached_head() {
    eprintln!("You are not on any branch, so there is nothing to sync. To fix this:");
    eprintln!("  1. Create a new branch: git checkout -b <branch-name>");
    eprintln!("  2. Or return to an existing branch: git checkout <branch-name>");
    eprintln!();
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Get the status indicator for a branch's relationship to its remote.
#[must_use]
pub fn divergence_indicator(divergence: RemoteDivergence) -> String {
    match divergence {
        RemoteDivergence::InSync => "●".green().to_string(),
        RemoteDivergence::Ahead { ahead } => format!("{} ({}↑)", "●".yellow(), ahead),
        RemoteDivergence::Behind { behind } => format!("{} ({}↓)", "●".yellow(), behind),
        RemoteDivergence::Diverged { ahead, behind } => {
            format!("{} ({}↑ {}↓)", "●".red(), ahead, behind)
        }
        RemoteDivergence::NoRemote => "○".dimmed().to_string(),
    }
}
