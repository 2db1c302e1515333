//! Error types for gitbrief modules using thiserror.

use std::time::Duration;

use thiserror::Error;

/// Errors from invoking the git executable.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable '{0}' not found on PATH")]
    NotInstalled(String),

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("`git {command}` exited with {}: {stderr}",
            code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`git {command}` timed out after {limit:?}")]
    Timeout { command: String, limit: Duration },

    #[error("Unexpected output from `git {command}`: {output:?}")]
    UnexpectedOutput { command: String, output: String },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl GitError {
    /// Whether this error came from the time bound rather than git itself.
    pub fn is_timeout(&self) -> bool {
        matches!(self, GitError::Timeout { .. })
    }

    /// Captured diagnostic text, when git produced any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            GitError::NonZeroExit { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

/// Errors from reading a commit proposal.
#[derive(Error, Debug)]
pub enum ProposalError {
    #[error("Failed to read proposal: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Proposal is not valid JSON: {0}")]
    InvalidJson(String),
}
