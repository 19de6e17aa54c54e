//! `keel sync` command - Bring the current branch in line with its remote.

use anyhow::Result;
use keel_core::plan::{self, Prediction};
use keel_core::{
    CancelReason, DivergenceChoice, FollowUp, Prober, RemoteOperation, Route, SyncEngine,
    SyncOptions, SyncOutcome,
};
use keel_git::Repository;

use crate::commands::utils;
use crate::output;
use crate::prompt::InquirePrompter;

/// Run the sync command.
pub fn run(branches: &[String], dry_run: bool) -> Result<()> {
    let repo = utils::open_repo()?;
    utils::ensure_on_branch(&repo)?;
    let config = utils::load_config(&repo)?;
    let options = SyncOptions::from_config(&config);

    if dry_run {
        return print_dry_run(&repo, &options, branches);
    }

    let prompter = InquirePrompter;
    let report = SyncEngine::new(&repo, &prompter, options).run(branches)?;
    tracing::debug!(operations = report.operations.len(), "sync finished");

    if report.outcome.is_cancelled() {
        output::info(&outcome_message(&report.outcome));
    } else {
        output::success(&outcome_message(&report.outcome));
    }
    Ok(())
}

fn print_dry_run(repo: &Repository, options: &SyncOptions, branches: &[String]) -> Result<()> {
    let state = Prober::new(repo, &options.remote).snapshot()?;
    let prediction = plan::predict(&state, branches, &options.remote);

    output::info("Dry run - based on the last fetch, would run:");
    for line in dry_run_lines(&prediction, options) {
        output::detail(&format!("  → {line}"));
    }

    if prediction.route == Route::Diverged {
        output::warn(&format!(
            "{} has diverged from {}/{} - you will be asked to rebase, force push or cancel",
            state.current_branch, options.remote, state.current_branch
        ));
    }
    Ok(())
}

/// Lines describing a predicted sync.
fn dry_run_lines(prediction: &Prediction, options: &SyncOptions) -> Vec<String> {
    let mut lines: Vec<String> = prediction
        .plan
        .operations
        .iter()
        .filter(|op| **op != RemoteOperation::Checkpoint || options.checkpoint.enabled)
        .map(ToString::to_string)
        .collect();

    match &prediction.follow_up {
        FollowUp::SquashMerge => {
            lines.push(format!("{} (after confirmation)", RemoteOperation::SquashMerge));
        }
        FollowUp::RefreshBranch(branch) => lines.push(format!("then sync against {branch}")),
        FollowUp::None => {}
    }
    lines
}

/// Message shown when a sync finishes.
fn outcome_message(outcome: &SyncOutcome) -> String {
    match outcome {
        SyncOutcome::Synced { branch } => format!("{branch} is in sync with its remote"),
        SyncOutcome::Published { branch } => format!("Published {branch}"),
        SyncOutcome::Resolved {
            branch,
            choice: DivergenceChoice::Force,
        } => format!("Force pushed {branch}"),
        SyncOutcome::Resolved { branch, .. } => format!("Rebased {branch} on its remote"),
        SyncOutcome::SquashMerged { branch } => {
            format!("Squash merge staged on {branch} - review and commit it")
        }
        SyncOutcome::Refreshed { remote, branch } => format!("Rebased onto {remote}/{branch}"),
        SyncOutcome::Cancelled(CancelReason::Divergence) => {
            "Cancelled - nothing was changed".to_string()
        }
        SyncOutcome::Cancelled(CancelReason::SquashDeclined) => {
            "Squash merge cancelled".to_string()
        }
    }
}
