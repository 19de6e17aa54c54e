//! Sync engine for bringing the current branch in line with its remote.
//!
//! This module contains the core logic for the `keel sync` command. The
//! order of steps matters:
//!
//! 1. Fetch, unconditionally.
//! 2. Diverged: show status, ask the user, run their choice, stop.
//! 3. No remote branch: publish it, checkpoint, push, stop.
//! 4. Otherwise checkpoint, make sure upstream exists, then push if ahead
//!    or rebase (plus any extra pull targets) and push.
//! 5. With one argument: squash-merge on `master`, or refresh against the
//!    named branch.
//!
//! State is probed again before each decision because the previous
//! operation may have changed it.

use keel_git::GitOps;

use crate::config::{CheckpointConfig, Config};
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::plan::{
    self, DIVERGENCE_PROMPT, DivergenceChoice, FollowUp, RemoteOperation, Route, SQUASH_PROMPT,
};
use crate::state::Prober;
use crate::traits::Prompter;

/// Settings the engine needs from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOptions {
    /// Remote to publish to and compare against.
    pub remote: String,
    /// How pending work is committed.
    pub checkpoint: CheckpointConfig,
}

impl SyncOptions {
    /// Build options from loaded config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            remote: config.general.default_remote.clone(),
            checkpoint: config.checkpoint.clone(),
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Why a sync stopped without changing anything further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The user chose "Cancel" at the divergence prompt.
    Divergence,
    /// The user declined the squash-merge.
    SquashDeclined,
}

/// How a sync finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Branch and remote agree.
    Synced { branch: String },
    /// Branch was pushed to the remote for the first time.
    Published { branch: String },
    /// A diverged branch was rebased or force-pushed.
    Resolved {
        branch: String,
        choice: DivergenceChoice,
    },
    /// Branch was squash-merged after syncing.
    SquashMerged { branch: String },
    /// Current branch was reconciled against another branch.
    Refreshed { remote: String, branch: String },
    /// The user stopped the sync. Not an error.
    Cancelled(CancelReason),
}

impl SyncOutcome {
    /// Check if the user cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub outcome: SyncOutcome,
    /// Operations that ran, in order.
    pub operations: Vec<RemoteOperation>,
}

/// Runs the sync workflow with trait-based dependencies.
pub struct SyncEngine<'a, G: GitOps, P: Prompter> {
    repo: &'a G,
    prompter: &'a P,
    options: SyncOptions,
}

impl<'a, G: GitOps, P: Prompter> SyncEngine<'a, G, P> {
    /// Create a new sync engine.
    #[must_use]
    pub const fn new(repo: &'a G, prompter: &'a P, options: SyncOptions) -> Self {
        Self {
            repo,
            prompter,
            options,
        }
    }

    /// Sync the current branch. `args` are the positional arguments given
    /// to `keel sync`.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if state can't be read, or
    /// `OperationFailed` for the first operation that fails.
    pub fn run(&self, args: &[String]) -> Result<SyncReport> {
        let mut executor = Executor::new(self.repo, &self.options.checkpoint);
        let outcome = self.sync(&mut executor, args)?;

        Ok(SyncReport {
            outcome,
            operations: executor.into_journal(),
        })
    }

    fn sync(&self, executor: &mut Executor<'_, G>, args: &[String]) -> Result<SyncOutcome> {
        executor.run(&RemoteOperation::Fetch)?;

        let prober = Prober::new(self.repo, &self.options.remote);
        let state = prober.snapshot()?;
        let branch = state.current_branch.clone();
        tracing::debug!(?state, "probed repository");

        match plan::route(&state) {
            Route::Diverged => return self.resolve_divergence(executor, &branch),
            Route::Publish => {
                tracing::info!(%branch, "no remote branch, publishing");
                executor.run_all(&plan::publish_operations(&self.options.remote, &branch))?;
                return Ok(SyncOutcome::Published { branch });
            }
            Route::Reconcile => {}
        }

        executor.run(&RemoteOperation::Checkpoint)?;

        if !prober.cloud_branch_exists()? {
            executor.run(&RemoteOperation::SetUpstream {
                remote: self.options.remote.clone(),
                branch: branch.clone(),
            })?;
        }

        let ahead = prober.is_ahead_of_remote()?;
        executor.run_all(&plan::reconcile_operations(ahead, args))?;

        match plan::follow_up(&prober.current_branch()?, args) {
            FollowUp::SquashMerge => self.squash_merge(executor, branch),
            FollowUp::RefreshBranch(target) => self.refresh(executor, &target),
            FollowUp::None => Ok(SyncOutcome::Synced { branch }),
        }
    }

    fn resolve_divergence(
        &self,
        executor: &mut Executor<'_, G>,
        branch: &str,
    ) -> Result<SyncOutcome> {
        tracing::info!(%branch, "branch has diverged, asking the user");
        executor.run(&RemoteOperation::StatusSummary)?;

        let options = DivergenceChoice::options(&self.options.remote, branch);
        let choice = self
            .prompter
            .select(DIVERGENCE_PROMPT, &options)?
            .map_or(DivergenceChoice::Cancel, |answer| {
                DivergenceChoice::from_label(&answer)
            });

        executor.run_all(&choice.operations())?;

        Ok(match choice {
            DivergenceChoice::Cancel => SyncOutcome::Cancelled(CancelReason::Divergence),
            choice => SyncOutcome::Resolved {
                branch: branch.to_string(),
                choice,
            },
        })
    }

    fn squash_merge(&self, executor: &mut Executor<'_, G>, branch: String) -> Result<SyncOutcome> {
        if !self.prompter.confirm(SQUASH_PROMPT)? {
            return Ok(SyncOutcome::Cancelled(CancelReason::SquashDeclined));
        }

        executor.run(&RemoteOperation::SquashMerge)?;
        Ok(SyncOutcome::SquashMerged { branch })
    }

    /// Sync scoped to another branch: fetch, then rebase the current branch
    /// onto that branch's remote tip.
    fn refresh(&self, executor: &mut Executor<'_, G>, target: &str) -> Result<SyncOutcome> {
        let remotes = self.repo.remotes().map_err(Error::BackendUnavailable)?;
        let (remote, branch) = plan::refresh_target(target, &remotes, &self.options.remote);
        tracing::info!(%remote, %branch, "refreshing against branch");

        executor.run(&RemoteOperation::Fetch)?;

        let exists = self
            .repo
            .remote_branch_exists(&remote, &branch)
            .map_err(Error::BackendUnavailable)?;
        if !exists {
            return Err(Error::RemoteBranchNotFound { remote, branch });
        }

        executor.run(&RemoteOperation::PullRebaseWithArgs(vec![
            remote.clone(),
            branch.clone(),
        ]))?;
        Ok(SyncOutcome::Refreshed { remote, branch })
    }
}
