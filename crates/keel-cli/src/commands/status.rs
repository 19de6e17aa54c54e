//! `keel status` command - Show how the current branch relates to its remote.

use anyhow::Result;
use keel_core::{Prober, RepositoryState};
use keel_git::RemoteDivergence;
use serde::Serialize;

use crate::commands::utils;
use crate::output;

/// JSON output for status command.
#[derive(Debug, Serialize)]
struct StatusOutput {
    #[serde(flatten)]
    state: RepositoryState,
    remote: String,
    ahead: usize,
    behind: usize,
}

/// Run the status command.
pub fn run(json: bool) -> Result<()> {
    let repo = utils::open_repo()?;
    utils::ensure_on_branch(&repo)?;
    let config = utils::load_config(&repo)?;
    let remote = config.general.default_remote;

    let prober = Prober::new(&repo, &remote);
    let state = prober.snapshot()?;
    let divergence = prober.divergence()?;

    if json {
        let output = StatusOutput {
            state,
            remote,
            ahead: divergence.ahead(),
            behind: divergence.behind(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output::info(&format!(
            "On branch {} {}",
            state.current_branch,
            output::divergence_indicator(divergence)
        ));
        output::detail(&format!(
            "  {}",
            describe(&remote, &state.current_branch, divergence)
        ));
    }

    Ok(())
}

fn describe(remote: &str, branch: &str, divergence: RemoteDivergence) -> String {
    match divergence {
        RemoteDivergence::InSync => format!("Up to date with {remote}/{branch}"),
        RemoteDivergence::Ahead { ahead } => {
            format!("{ahead} commit(s) ahead of {remote}/{branch} - `keel sync` will push")
        }
        RemoteDivergence::Behind { behind } => {
            format!("{behind} commit(s) behind {remote}/{branch} - `keel sync` will rebase")
        }
        RemoteDivergence::Diverged { ahead, behind } => format!(
            "Diverged from {remote}/{branch} ({ahead} ahead, {behind} behind) - `keel sync` will ask"
        ),
        RemoteDivergence::NoRemote => {
            format!("No remote branch {remote}/{branch} - `keel sync` will publish it")
        }
    }
}
