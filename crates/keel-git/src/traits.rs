//! Trait abstractions for git operations.
//!
//! This module defines the `GitOps` trait which abstracts the backend,
//! enabling dependency injection and testability.

use crate::{RemoteDivergence, Result};

/// Trait for the version-control operations keel needs.
///
/// Queries never mutate anything. Every mutation maps to exactly one
/// invocation of `git` whose output goes straight to the terminal.
#[allow(clippy::missing_errors_doc)]
pub trait GitOps {
    // === Queries ===

    /// Get the current branch name.
    ///
    /// Returns an error if HEAD is detached or not on a branch.
    fn current_branch(&self) -> Result<String>;

    /// Check whether `<remote>/<branch>` exists as a remote-tracking branch.
    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool>;

    /// Compare a local branch with `<remote>/<branch>`.
    fn remote_divergence(&self, remote: &str, branch: &str) -> Result<RemoteDivergence>;

    /// Names of the configured remotes.
    fn remotes(&self) -> Result<Vec<String>>;

    // === Remote Operations ===

    /// `git fetch`
    fn fetch(&self) -> Result<()>;

    /// `git pull --rebase [extra...]`
    fn pull_rebase(&self, extra: &[String]) -> Result<()>;

    /// `git push`
    fn push(&self) -> Result<()>;

    /// `git push --force-with-lease`
    fn push_force_with_lease(&self) -> Result<()>;

    /// `git push --set-upstream <remote> <branch>`
    fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<()>;

    /// `git merge --squash`
    fn merge_squash(&self) -> Result<()>;

    /// `git status -sb --untracked-files=no`
    fn status_summary(&self) -> Result<()>;

    // === Working Directory ===

    /// Commit pending work so it travels with the sync.
    ///
    /// Returns `true` if a commit was created.
    fn checkpoint(&self, message: &str, include_untracked: bool) -> Result<bool>;
}
