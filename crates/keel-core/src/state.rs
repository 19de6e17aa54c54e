//! Repository state probing.
//!
//! Every query goes back to the backend. Nothing is cached between calls.

use keel_git::{GitOps, RemoteDivergence};
use serde::Serialize;

use crate::error::{Error, Result};

/// Answers about the current branch relative to its remote.
///
/// `is_diverged` and `is_ahead_of_remote` are never both true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryState {
    pub current_branch: String,
    pub is_diverged: bool,
    pub cloud_branch_exists: bool,
    pub is_ahead_of_remote: bool,
}

/// Queries repository state for the current branch against one remote.
pub struct Prober<'a, G: GitOps> {
    repo: &'a G,
    remote: &'a str,
}

impl<'a, G: GitOps> Prober<'a, G> {
    /// Create a prober comparing against `remote`.
    #[must_use]
    pub const fn new(repo: &'a G, remote: &'a str) -> Self {
        Self { repo, remote }
    }

    /// Name of the checked-out branch.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if HEAD is detached or unreadable.
    pub fn current_branch(&self) -> Result<String> {
        self.repo
            .current_branch()
            .map_err(Error::BackendUnavailable)
    }

    /// Local and remote histories have each advanced independently.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if the query fails.
    pub fn is_diverged(&self) -> Result<bool> {
        Ok(self.divergence()?.is_diverged())
    }

    /// `<remote>/<current branch>` exists.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if the query fails.
    pub fn cloud_branch_exists(&self) -> Result<bool> {
        let branch = self.current_branch()?;
        self.repo
            .remote_branch_exists(self.remote, &branch)
            .map_err(Error::BackendUnavailable)
    }

    /// Local has unpushed commits and is missing nothing from the remote.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if the query fails.
    pub fn is_ahead_of_remote(&self) -> Result<bool> {
        Ok(self.divergence()?.is_ahead())
    }

    /// Full ahead/behind relationship for the current branch.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if the query fails.
    pub fn divergence(&self) -> Result<RemoteDivergence> {
        let branch = self.current_branch()?;
        self.repo
            .remote_divergence(self.remote, &branch)
            .map_err(Error::BackendUnavailable)
    }

    /// Run all four queries.
    ///
    /// # Errors
    /// Returns `BackendUnavailable` if any query fails.
    pub fn snapshot(&self) -> Result<RepositoryState> {
        Ok(RepositoryState {
            current_branch: self.current_branch()?,
            is_diverged: self.is_diverged()?,
            cloud_branch_exists: self.cloud_branch_exists()?,
            is_ahead_of_remote: self.is_ahead_of_remote()?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_mocks::MockGitOps;

    #[test]
    fn test_snapshot_in_sync() {
        let repo = MockGitOps::new()
            .with_current_branch("feature-x")
            .with_divergence(RemoteDivergence::InSync);

        let state = Prober::new(&repo, "origin").snapshot().unwrap();
        assert_eq!(
            state,
            RepositoryState {
                current_branch: "feature-x".to_string(),
                is_diverged: false,
                cloud_branch_exists: true,
                is_ahead_of_remote: false,
            }
        );
    }

    #[test]
    fn test_snapshot_diverged_is_not_ahead() {
        let repo = MockGitOps::new().with_divergence(RemoteDivergence::Diverged {
            ahead: 2,
            behind: 1,
        });

        let state = Prober::new(&repo, "origin").snapshot().unwrap();
        assert!(state.is_diverged);
        assert!(!state.is_ahead_of_remote);
        assert!(state.cloud_branch_exists);
    }

    #[test]
    fn test_snapshot_no_remote() {
        let repo = MockGitOps::new().with_divergence(RemoteDivergence::NoRemote);

        let state = Prober::new(&repo, "origin").snapshot().unwrap();
        assert!(!state.cloud_branch_exists);
        assert!(!state.is_diverged);
        assert!(!state.is_ahead_of_remote);
    }

    #[test]
    fn test_queries_are_not_cached() {
        let repo = MockGitOps::new().with_divergence(RemoteDivergence::InSync);
        let prober = Prober::new(&repo, "origin");
        assert!(!prober.is_ahead_of_remote().unwrap());

        repo.set_divergence(RemoteDivergence::Ahead { ahead: 1 });
        assert!(prober.is_ahead_of_remote().unwrap());
    }

    #[test]
    fn test_detached_head_is_backend_unavailable() {
        let repo = MockGitOps::new().with_detached_head();
        let result = Prober::new(&repo, "origin").snapshot();
        assert!(matches!(result, Err(Error::BackendUnavailable(_))));
    }
}
