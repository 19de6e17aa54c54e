//! Relationship between a local branch and its remote-tracking branch.

/// How a local branch relates to `<remote>/<branch>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteDivergence {
    /// Both point at the same commit.
    InSync,
    /// Local has commits the remote lacks, and nothing is missing locally.
    Ahead { ahead: usize },
    /// Remote has commits the local branch lacks, and nothing is unpushed.
    Behind { behind: usize },
    /// Both sides advanced independently.
    Diverged { ahead: usize, behind: usize },
    /// There is no remote-tracking branch.
    NoRemote,
}

impl RemoteDivergence {
    /// Classify a pair of ahead/behind counts.
    #[must_use]
    pub const fn from_counts(ahead: usize, behind: usize) -> Self {
        match (ahead, behind) {
            (0, 0) => Self::InSync,
            (ahead, 0) => Self::Ahead { ahead },
            (0, behind) => Self::Behind { behind },
            (ahead, behind) => Self::Diverged { ahead, behind },
        }
    }

    /// Neither side is an ancestor of the other.
    #[must_use]
    pub const fn is_diverged(self) -> bool {
        matches!(self, Self::Diverged { .. })
    }

    /// Local strictly contains the remote.
    #[must_use]
    pub const fn is_ahead(self) -> bool {
        matches!(self, Self::Ahead { .. })
    }

    /// A remote-tracking branch exists.
    #[must_use]
    pub const fn remote_exists(self) -> bool {
        !matches!(self, Self::NoRemote)
    }

    /// Commits present locally but not on the remote.
    #[must_use]
    pub const fn ahead(self) -> usize {
        match self {
            Self::Ahead { ahead } | Self::Diverged { ahead, .. } => ahead,
            _ => 0,
        }
    }

    /// Commits present on the remote but not locally.
    #[must_use]
    pub const fn behind(self) -> usize {
        match self {
            Self::Behind { behind } | Self::Diverged { behind, .. } => behind,
            _ => 0,
        }
    }
}
