//! Repository wrapper providing the git backend for keel.

use std::path::Path;
use std::process::Command;

use git2::{BranchType, ErrorCode, Oid, StatusOptions};

use crate::divergence::RemoteDivergence;
use crate::error::{Error, Result};
use crate::traits::GitOps;

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
    color: bool,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::NotARepository
            } else {
                Error::Git2(e)
            }
        })?;
        Ok(Self {
            inner,
            color: false,
        })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Ask git to colorize the output of remote operations.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Check for uncommitted changes.
    ///
    /// Untracked files only count when `include_untracked` is set.
    ///
    /// # Errors
    /// Returns error if status check fails.
    pub fn has_changes(&self, include_untracked: bool) -> Result<bool> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(include_untracked)
            .recurse_untracked_dirs(include_untracked)
            .include_ignored(false);

        let statuses = self.inner.statuses(Some(&mut opts))?;
        Ok(!statuses.is_empty())
    }

    /// Tip of `refs/remotes/<remote>/<branch>`, if it exists.
    fn remote_tip(&self, remote: &str, branch: &str) -> Result<Option<Oid>> {
        let name = format!("refs/remotes/{remote}/{branch}");
        match self.inner.find_reference(&name) {
            Ok(reference) => Ok(reference.resolve()?.target()),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn local_tip(&self, branch: &str) -> Result<Oid> {
        let found = self
            .inner
            .find_branch(branch, BranchType::Local)
            .map_err(|_| Error::BranchNotFound(branch.into()))?;

        found
            .get()
            .target()
            .ok_or_else(|| Error::BranchNotFound(branch.into()))
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        if let Some(dir) = self.workdir() {
            cmd.current_dir(dir);
        }
        if self.color {
            cmd.args(["-c", "color.ui=always"]);
        }
        cmd
    }

    /// Run `git` with inherited stdio, failing on a non-zero exit.
    fn run_git(&self, args: &[&str]) -> Result<()> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!(%command, "running git");

        let status = self.git().args(args).status().map_err(Error::Spawn)?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command,
                code: status.code(),
            })
        }
    }
}

impl GitOps for Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.inner.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }

        head.shorthand()
            .map(String::from)
            .ok_or(Error::DetachedHead)
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> Result<bool> {
        Ok(self.remote_tip(remote, branch)?.is_some())
    }

    fn remote_divergence(&self, remote: &str, branch: &str) -> Result<RemoteDivergence> {
        let local = self.local_tip(branch)?;
        let Some(upstream) = self.remote_tip(remote, branch)? else {
            return Ok(RemoteDivergence::NoRemote);
        };

        let (ahead, behind) = self.inner.graph_ahead_behind(local, upstream)?;
        tracing::debug!(branch, remote, ahead, behind, "compared with remote");
        Ok(RemoteDivergence::from_counts(ahead, behind))
    }

    fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.inner.remotes()?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    fn fetch(&self) -> Result<()> {
        self.run_git(&["fetch"])
    }

    fn pull_rebase(&self, extra: &[String]) -> Result<()> {
        let mut args = vec!["pull", "--rebase"];
        args.extend(extra.iter().map(String::as_str));
        self.run_git(&args)
    }

    fn push(&self) -> Result<()> {
        self.run_git(&["push"])
    }

    fn push_force_with_lease(&self) -> Result<()> {
        self.run_git(&["push", "--force-with-lease"])
    }

    fn push_set_upstream(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_git(&["push", "--set-upstream", remote, branch])
    }

    fn merge_squash(&self) -> Result<()> {
        self.run_git(&["merge", "--squash"])
    }

    fn status_summary(&self) -> Result<()> {
        self.run_git(&["status", "-sb", "--untracked-files=no"])
    }

    fn checkpoint(&self, message: &str, include_untracked: bool) -> Result<bool> {
        if !self.has_changes(include_untracked)? {
            tracing::debug!("working tree clean, nothing to checkpoint");
            return Ok(false);
        }

        self.run_git(&["add", if include_untracked { "-A" } else { "-u" }])?;
        self.run_git(&["commit", "-m", message])?;
        Ok(true)
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .field("color", &self.color)
            .finish()
    }
}
