//! Mock implementations for testing the engine.
//!
//! `MockGitOps` simulates how git moves the current branch relative to its
//! remote as operations run, so multi-step syncs can be checked without a
//! real repository.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use keel_git::{Error as GitError, GitOps, RemoteDivergence, Result as GitResult};

use crate::error::{Error, Result};
use crate::traits::Prompter;

/// Mock implementation of `GitOps` for testing.
pub struct MockGitOps {
    current_branch: RefCell<String>,
    detached: Cell<bool>,
    divergence: Cell<RemoteDivergence>,
    after_fetch: Cell<Option<RemoteDivergence>>,
    dirty: Cell<bool>,
    lose_remote_on_checkpoint: Cell<bool>,
    remotes: Vec<String>,
    remote_branches: Vec<String>,
    fail_on: Option<String>,
    calls: RefCell<Vec<String>>,
}

impl Default for MockGitOps {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGitOps {
    pub fn new() -> Self {
        Self {
            current_branch: RefCell::new("feature-x".to_string()),
            detached: Cell::new(false),
            divergence: Cell::new(RemoteDivergence::InSync),
            after_fetch: Cell::new(None),
            dirty: Cell::new(false),
            lose_remote_on_checkpoint: Cell::new(false),
            remotes: vec!["origin".to_string()],
            remote_branches: Vec::new(),
            fail_on: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_current_branch(self, name: &str) -> Self {
        *self.current_branch.borrow_mut() = name.to_string();
        self
    }

    pub fn with_detached_head(self) -> Self {
        self.detached.set(true);
        self
    }

    pub fn with_divergence(self, divergence: RemoteDivergence) -> Self {
        self.divergence.set(divergence);
        self
    }

    /// State revealed by the next `fetch`.
    pub fn with_fetched_divergence(self, divergence: RemoteDivergence) -> Self {
        self.after_fetch.set(Some(divergence));
        self
    }

    pub fn with_dirty_tree(self) -> Self {
        self.dirty.set(true);
        self
    }

    /// The remote branch is deleted while the checkpoint runs.
    pub fn with_remote_lost_on_checkpoint(self) -> Self {
        self.lose_remote_on_checkpoint.set(true);
        self
    }

    pub fn with_remote(mut self, name: &str) -> Self {
        self.remotes.push(name.to_string());
        self
    }

    /// Another branch that exists on a remote, as `remote/branch`.
    pub fn with_remote_branch(mut self, name: &str) -> Self {
        self.remote_branches.push(name.to_string());
        self
    }

    /// Fail every call whose recorded name starts with `prefix`.
    pub fn with_failure(mut self, prefix: &str) -> Self {
        self.fail_on = Some(prefix.to_string());
        self
    }

    pub fn set_divergence(&self, divergence: RemoteDivergence) {
        self.divergence.set(divergence);
    }

    pub fn divergence(&self) -> RemoteDivergence {
        self.divergence.get()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) -> GitResult<()> {
        let failed = self
            .fail_on
            .as_deref()
            .is_some_and(|prefix| call.starts_with(prefix));
        self.calls.borrow_mut().push(call.clone());

        if failed {
            return Err(GitError::CommandFailed {
                command: format!("git {call}"),
                code: Some(1),
            });
        }
        Ok(())
    }

    fn rejected(call: &str) -> GitError {
        GitError::CommandFailed {
            command: format!("git {call}"),
            code: Some(1),
        }
    }
}

impl GitOps for MockGitOps {
    fn current_branch(&self) -> GitResult<String> {
        if self.detached.get() {
            return Err(GitError::DetachedHead);
        }
        Ok(self.current_branch.borrow().clone())
    }

    fn remote_branch_exists(&self, remote: &str, branch: &str) -> GitResult<bool> {
        if *self.current_branch.borrow() == branch {
            return Ok(self.divergence.get().remote_exists());
        }
        let name = format!("{remote}/{branch}");
        Ok(self.remote_branches.contains(&name))
    }

    fn remote_divergence(&self, _remote: &str, branch: &str) -> GitResult<RemoteDivergence> {
        if *self.current_branch.borrow() == branch {
            Ok(self.divergence.get())
        } else {
            Ok(RemoteDivergence::NoRemote)
        }
    }

    fn remotes(&self) -> GitResult<Vec<String>> {
        Ok(self.remotes.clone())
    }

    fn fetch(&self) -> GitResult<()> {
        self.record("fetch".to_string())?;
        if let Some(divergence) = self.after_fetch.take() {
            self.divergence.set(divergence);
        }
        Ok(())
    }

    fn pull_rebase(&self, extra: &[String]) -> GitResult<()> {
        let mut call = "pull --rebase".to_string();
        for arg in extra {
            call.push(' ');
            call.push_str(arg);
        }
        self.record(call.clone())?;

        if extra.is_empty() {
            let next = match self.divergence.get() {
                RemoteDivergence::NoRemote => return Err(Self::rejected(&call)),
                RemoteDivergence::Behind { .. } | RemoteDivergence::InSync => {
                    RemoteDivergence::InSync
                }
                RemoteDivergence::Ahead { ahead } | RemoteDivergence::Diverged { ahead, .. } => {
                    RemoteDivergence::Ahead { ahead }
                }
            };
            self.divergence.set(next);
        }
        Ok(())
    }

    fn push(&self) -> GitResult<()> {
        self.record("push".to_string())?;
        match self.divergence.get() {
            RemoteDivergence::InSync | RemoteDivergence::Ahead { .. } => {
                self.divergence.set(RemoteDivergence::InSync);
                Ok(())
            }
            _ => Err(Self::rejected("push")),
        }
    }

    fn push_force_with_lease(&self) -> GitResult<()> {
        self.record("push --force-with-lease".to_string())?;
        self.divergence.set(RemoteDivergence::InSync);
        Ok(())
    }

    fn push_set_upstream(&self, remote: &str, branch: &str) -> GitResult<()> {
        self.record(format!("push --set-upstream {remote} {branch}"))?;
        if self.divergence.get() == RemoteDivergence::NoRemote {
            self.divergence.set(RemoteDivergence::InSync);
        }
        Ok(())
    }

    fn merge_squash(&self) -> GitResult<()> {
        self.record("merge --squash".to_string())
    }

    fn status_summary(&self) -> GitResult<()> {
        self.record("status".to_string())
    }

    fn checkpoint(&self, _message: &str, _include_untracked: bool) -> GitResult<bool> {
        self.record("checkpoint".to_string())?;
        if self.lose_remote_on_checkpoint.replace(false) {
            self.divergence.set(RemoteDivergence::NoRemote);
        }
        if !self.dirty.replace(false) {
            return Ok(false);
        }

        let next = match self.divergence.get() {
            RemoteDivergence::NoRemote => RemoteDivergence::NoRemote,
            RemoteDivergence::InSync => RemoteDivergence::Ahead { ahead: 1 },
            RemoteDivergence::Ahead { ahead } => RemoteDivergence::Ahead { ahead: ahead + 1 },
            RemoteDivergence::Behind { behind } => RemoteDivergence::Diverged { ahead: 1, behind },
            RemoteDivergence::Diverged { ahead, behind } => RemoteDivergence::Diverged {
                ahead: ahead + 1,
                behind,
            },
        };
        self.divergence.set(next);
        Ok(true)
    }
}

/// Prompter that replays scripted answers.
#[derive(Default)]
pub struct ScriptedPrompter {
    selections: RefCell<VecDeque<Option<String>>>,
    confirmations: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the next select with the option starting with `prefix`.
    pub fn with_selection(self, prefix: &str) -> Self {
        self.selections
            .borrow_mut()
            .push_back(Some(prefix.to_string()));
        self
    }

    /// Dismiss the next select without choosing.
    pub fn with_dismissal(self) -> Self {
        self.selections.borrow_mut().push_back(None);
        self
    }

    pub fn with_confirmation(self, answer: bool) -> Self {
        self.confirmations.borrow_mut().push_back(answer);
        self
    }

    /// Messages of every prompt shown, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        self.asked.borrow_mut().push(message.to_string());
        self.confirmations
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected confirm: {message}")))
    }

    fn select(&self, message: &str, options: &[String]) -> Result<Option<String>> {
        self.asked.borrow_mut().push(message.to_string());
        let Some(prefix) = self
            .selections
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Prompt(format!("unexpected select: {message}")))?
        else {
            return Ok(None);
        };

        options
            .iter()
            .find(|option| option.starts_with(&prefix))
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::Prompt(format!("no option starting with {prefix}")))
    }
}
