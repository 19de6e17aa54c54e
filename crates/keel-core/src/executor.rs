//! Remote operation executor.
//!
//! Runs operations one at a time against the backend and keeps a journal of
//! what ran. The first failure stops everything; nothing is retried and
//! nothing already applied is rolled back.

use keel_git::GitOps;

use crate::config::CheckpointConfig;
use crate::error::{Error, Result};
use crate::plan::RemoteOperation;

/// Executes [`RemoteOperation`]s in order.
pub struct Executor<'a, G: GitOps> {
    repo: &'a G,
    checkpoint: &'a CheckpointConfig,
    journal: Vec<RemoteOperation>,
}

impl<'a, G: GitOps> Executor<'a, G> {
    /// Create an executor.
    #[must_use]
    pub const fn new(repo: &'a G, checkpoint: &'a CheckpointConfig) -> Self {
        Self {
            repo,
            checkpoint,
            journal: Vec::new(),
        }
    }

    /// Run one operation.
    ///
    /// A disabled checkpoint is skipped and not journaled.
    ///
    /// # Errors
    /// Returns `OperationFailed` if the backend reports a failure.
    pub fn run(&mut self, operation: &RemoteOperation) -> Result<()> {
        if *operation == RemoteOperation::Checkpoint && !self.checkpoint.enabled {
            tracing::debug!("checkpoint disabled, skipping");
            return Ok(());
        }

        tracing::info!(%operation, "running");
        self.dispatch(operation)
            .map_err(|source| Error::OperationFailed {
                operation: operation.to_string(),
                source,
            })?;

        self.journal.push(operation.clone());
        Ok(())
    }

    /// Run operations in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first `OperationFailed`.
    pub fn run_all(&mut self, operations: &[RemoteOperation]) -> Result<()> {
        operations.iter().try_for_each(|operation| self.run(operation))
    }

    /// Operations that completed, in order.
    #[must_use]
    pub fn journal(&self) -> &[RemoteOperation] {
        &self.journal
    }

    /// Consume the executor, returning the journal.
    #[must_use]
    pub fn into_journal(self) -> Vec<RemoteOperation> {
        self.journal
    }

    fn dispatch(&self, operation: &RemoteOperation) -> keel_git::Result<()> {
        match operation {
            RemoteOperation::Fetch => self.repo.fetch(),
            RemoteOperation::StatusSummary => self.repo.status_summary(),
            RemoteOperation::SetUpstream { remote, branch } => {
                self.repo.push_set_upstream(remote, branch)
            }
            RemoteOperation::Checkpoint => {
                let committed = self
                    .repo
                    .checkpoint(&self.checkpoint.message, self.checkpoint.include_untracked)?;
                tracing::debug!(committed, "checkpoint finished");
                Ok(())
            }
            RemoteOperation::Rebase => self.repo.pull_rebase(&[]),
            RemoteOperation::PullRebaseWithArgs(args) => self.repo.pull_rebase(args),
            RemoteOperation::Push => self.repo.push(),
            RemoteOperation::ForcePush => self.repo.push_force_with_lease(),
            RemoteOperation::SquashMerge => self.repo.merge_squash(),
        }
    }
}
