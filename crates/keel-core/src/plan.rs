//! Sync decisions.
//!
//! Everything here is a pure function of repository state and the
//! arguments given to `keel sync`. [`crate::SyncEngine`] calls these
//! between operations with freshly probed state.

use std::fmt;

use crate::state::RepositoryState;

/// Branch that triggers the squash-merge follow-up.
pub const SQUASH_TARGET: &str = "master";

/// Prompt shown when local and remote histories have diverged.
pub const DIVERGENCE_PROMPT: &str = "Branch is diverged from origin/upstream – handle by...";

/// Confirmation shown before squash-merging.
pub const SQUASH_PROMPT: &str = "Squash & merge this branch into master?";

/// One step of a sync, mapped to a single backend command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOperation {
    Fetch,
    /// Short status, for the user to look at before deciding.
    StatusSummary,
    SetUpstream { remote: String, branch: String },
    /// Commit pending work so it travels with the sync.
    Checkpoint,
    Rebase,
    PullRebaseWithArgs(Vec<String>),
    Push,
    ForcePush,
    SquashMerge,
}

impl fmt::Display for RemoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => f.write_str("git fetch"),
            Self::StatusSummary => f.write_str("git status -sb --untracked-files=no"),
            Self::SetUpstream { remote, branch } => {
                write!(f, "git push --set-upstream {remote} {branch}")
            }
            Self::Checkpoint => f.write_str("checkpoint"),
            Self::Rebase => f.write_str("git pull --rebase"),
            Self::PullRebaseWithArgs(args) => write!(f, "git pull --rebase {}", args.join(" ")),
            Self::Push => f.write_str("git push"),
            Self::ForcePush => f.write_str("git push --force-with-lease"),
            Self::SquashMerge => f.write_str("git merge --squash"),
        }
    }
}

/// Ordered operations for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub operations: Vec<RemoteOperation>,
}

impl From<Vec<RemoteOperation>> for SyncPlan {
    fn from(operations: Vec<RemoteOperation>) -> Self {
        Self { operations }
    }
}

/// Which path the sync takes after fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Needs a human decision; nothing is pushed or pulled automatically.
    Diverged,
    /// No remote branch yet: publish it.
    Publish,
    /// Remote exists and histories are compatible.
    Reconcile,
}

/// Pick the route. Divergence wins over everything else.
#[must_use]
pub const fn route(state: &RepositoryState) -> Route {
    if state.is_diverged {
        Route::Diverged
    } else if !state.cloud_branch_exists {
        Route::Publish
    } else {
        Route::Reconcile
    }
}

/// Operations that publish a branch that has no remote counterpart.
#[must_use]
pub fn publish_operations(remote: &str, branch: &str) -> Vec<RemoteOperation> {
    vec![
        RemoteOperation::SetUpstream {
            remote: remote.to_string(),
            branch: branch.to_string(),
        },
        RemoteOperation::Checkpoint,
        RemoteOperation::Push,
    ]
}

/// Operations that bring an existing remote branch in line.
///
/// Extra arguments become additional pull targets.
#[must_use]
pub fn reconcile_operations(ahead: bool, args: &[String]) -> Vec<RemoteOperation> {
    if ahead {
        return vec![RemoteOperation::Push];
    }

    let mut operations = vec![RemoteOperation::Rebase];
    if !args.is_empty() {
        operations.push(RemoteOperation::PullRebaseWithArgs(args.to_vec()));
    }
    operations.push(RemoteOperation::Push);
    operations
}

/// What happens after a successful reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// Ask whether to squash-merge.
    SquashMerge,
    /// Sync against another branch.
    RefreshBranch(String),
    None,
}

/// Decide the follow-up from the current branch and the arguments.
///
/// The squash trigger is a literal suffix match: `upstream/master`
/// qualifies, `master2` does not.
#[must_use]
pub fn follow_up(current_branch: &str, args: &[String]) -> FollowUp {
    match args {
        [only] if current_branch == SQUASH_TARGET && only.ends_with(SQUASH_TARGET) => {
            FollowUp::SquashMerge
        }
        [only] => FollowUp::RefreshBranch(only.clone()),
        _ => FollowUp::None,
    }
}

/// Split a refresh argument into `(remote, branch)`.
///
/// `upstream/develop` names a remote when `upstream` is configured;
/// anything else is a branch on `default_remote`.
#[must_use]
pub fn refresh_target(arg: &str, remotes: &[String], default_remote: &str) -> (String, String) {
    remotes
        .iter()
        .find_map(|remote| {
            arg.strip_prefix(remote.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .filter(|branch| !branch.is_empty())
                .map(|branch| (remote.clone(), branch.to_string()))
        })
        .unwrap_or_else(|| (default_remote.to_string(), arg.to_string()))
}

/// The user's answer to the divergence prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergenceChoice {
    Rebase,
    Force,
    Cancel,
}

impl DivergenceChoice {
    /// The three prompt options, in display order.
    #[must_use]
    pub fn options(remote: &str, branch: &str) -> Vec<String> {
        [Self::Rebase, Self::Force, Self::Cancel]
            .into_iter()
            .map(|choice| choice.label(remote, branch))
            .collect()
    }

    /// Prompt text for this choice.
    #[must_use]
    pub fn label(self, remote: &str, branch: &str) -> String {
        match self {
            Self::Rebase => "Rebase on origin/upstream".to_string(),
            Self::Force => format!("Force (destructive) push to {remote}/{branch}"),
            Self::Cancel => "Cancel".to_string(),
        }
    }

    /// Map a selected option back to a choice. Unknown answers cancel.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.starts_with("Rebase") {
            Self::Rebase
        } else if label.starts_with("Force") {
            Self::Force
        } else {
            Self::Cancel
        }
    }

    /// Operations this choice runs.
    #[must_use]
    pub fn operations(self) -> Vec<RemoteOperation> {
        match self {
            Self::Rebase => vec![RemoteOperation::Rebase],
            Self::Force => vec![RemoteOperation::ForcePush],
            Self::Cancel => vec![],
        }
    }
}

/// What `keel sync` would do, computed without touching the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub route: Route,
    pub plan: SyncPlan,
    pub follow_up: FollowUp,
}

/// Predict a sync from the last fetched state.
///
/// Assumes the checkpoint commits nothing. A diverged branch stops at the
/// status summary because the rest depends on the user's answer.
#[must_use]
pub fn predict(state: &RepositoryState, args: &[String], remote: &str) -> Prediction {
    let route = route(state);
    let mut operations = vec![RemoteOperation::Fetch];
    let mut next = FollowUp::None;

    match route {
        Route::Diverged => operations.push(RemoteOperation::StatusSummary),
        Route::Publish => {
            operations.extend(publish_operations(remote, &state.current_branch));
        }
        Route::Reconcile => {
            operations.push(RemoteOperation::Checkpoint);
            operations.extend(reconcile_operations(state.is_ahead_of_remote, args));
            next = follow_up(&state.current_branch, args);
        }
    }

    Prediction {
        route,
        plan: operations.into(),
        follow_up: next,
    }
}
