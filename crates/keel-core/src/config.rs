//! Configuration management for keel.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// keel configuration loaded from .git/keel/config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// How pending work is committed before a sync.
    #[serde(default)]
    pub checkpoint: CheckpointConfig,
}

impl Config {
    /// Location of the config file inside a `.git` directory.
    #[must_use]
    pub fn path_in(git_dir: &Path) -> PathBuf {
        git_dir.join("keel").join("config.toml")
    }

    /// Load config from a TOML file.
    ///
    /// # Errors
    /// Returns error if file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// General keel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Remote that branches are published to and compared against.
    #[serde(default = "default_remote")]
    pub default_remote: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_remote: default_remote(),
        }
    }
}

fn default_remote() -> String {
    "origin".into()
}

/// Checkpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    /// Commit pending work before syncing.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Commit message for checkpoint commits.
    #[serde(default = "default_message")]
    pub message: String,

    /// Also commit untracked files.
    #[serde(default)]
    pub include_untracked: bool,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            message: default_message(),
            include_untracked: false,
        }
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_message() -> String {
    "save".into()
}
