//! Error types for keel-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in keel-core operations.
///
/// The user cancelling a prompt is not an error; see
/// [`crate::SyncOutcome::Cancelled`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Repository state could not be queried.
    #[error("cannot read repository state")]
    BackendUnavailable(#[source] keel_git::Error),

    /// A remote operation failed. Earlier operations are not undone.
    #[error("{operation} failed")]
    OperationFailed {
        /// The operation as a command line.
        operation: String,
        /// What the backend reported.
        #[source]
        source: keel_git::Error,
    },

    /// The branch named for a refresh has no remote-tracking branch.
    #[error("no remote branch {remote}/{branch}")]
    RemoteBranchNotFound { remote: String, branch: String },

    /// An interactive prompt could not be shown or answered.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// IO error.
    #[error("io error")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("invalid config")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_operation_failed_keeps_cause_as_source() {
        let err = Error::OperationFailed {
            operation: "git push".to_string(),
            source: keel_git::Error::CommandFailed {
                command: "git push".to_string(),
                code: Some(1),
            },
        };

        assert_eq!(err.to_string(), "git push failed");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("`git push` exited with status 1")
        );
    }
}
