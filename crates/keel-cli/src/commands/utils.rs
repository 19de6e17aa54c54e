use anyhow::{Context, Result, bail};
use keel_core::Config;
use keel_git::{Error as GitError, GitOps, Repository};

use crate::output;

/// Open the repository containing the current directory.
pub fn open_repo() -> Result<Repository> {
    let repo = Repository::open_current().context("Not inside a git repository")?;
    Ok(repo.with_color(console::colors_enabled()))
}

/// Load `.git/keel/config.toml`, falling back to defaults.
pub fn load_config(repo: &Repository) -> Result<Config> {
    let path = Config::path_in(repo.git_dir());
    Config::load(&path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Ensure the repository is not in detached HEAD state.
/// If detached, prints guidance and returns an error.
pub fn ensure_on_branch(repo: &Repository) -> Result<()> {
    match repo.current_branch() {
        Ok(_) => Ok(()),
        Err(GitError::DetachedHead) => {
            output::error_detached_head();
            bail!("Cannot run this command in detached HEAD state");
        }
        Err(e) => Err(e).context("Cannot determine the current branch"),
    }
}
