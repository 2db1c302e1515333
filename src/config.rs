//! Configuration for the change interface.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

/// Default bound on `git diff` (10 seconds).
pub const DEFAULT_DIFF_TIMEOUT_SECS: u64 = 10;

/// Default git executable.
pub const DEFAULT_GIT_BINARY: &str = "git";

/// Environment variable to override the diff timeout (seconds).
pub const DIFF_TIMEOUT_ENV_VAR: &str = "GITBRIEF_DIFF_TIMEOUT";

/// Environment variable to override the git executable.
pub const GIT_BINARY_ENV_VAR: &str = "GITBRIEF_GIT";

/// Settings for a [`ChangeInterface`](crate::git::ChangeInterface).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeConfig {
    /// Working directory every git invocation runs in.
    pub project_root: PathBuf,
    pub git_binary: String,
    pub diff_timeout: Duration,
}

impl ChangeConfig {
    /// Defaults for the given project root, ignoring the environment.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            git_binary: DEFAULT_GIT_BINARY.to_string(),
            diff_timeout: Duration::from_secs(DEFAULT_DIFF_TIMEOUT_SECS),
        }
    }

    /// Defaults overridden by `GITBRIEF_DIFF_TIMEOUT` and `GITBRIEF_GIT`.
    pub fn from_env(project_root: impl Into<PathBuf>) -> Self {
        let mut config = Self::new(project_root);
        config.diff_timeout = diff_timeout_from_env();
        if let Ok(binary) = env::var(GIT_BINARY_ENV_VAR) {
            if !binary.trim().is_empty() {
                config.git_binary = binary.trim().to_string();
            }
        }
        config
    }

    pub fn with_git_binary(mut self, binary: impl Into<String>) -> Self {
        self.git_binary = binary.into();
        self
    }

    pub fn with_diff_timeout(mut self, timeout: Duration) -> Self {
        self.diff_timeout = timeout;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

/// Read the diff timeout from the environment.
///
/// Logs a warning if the variable is set but is not a whole number of
/// seconds, and falls back to the default.
fn diff_timeout_from_env() -> Duration {
    match env::var(DIFF_TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    DIFF_TIMEOUT_ENV_VAR, v, DEFAULT_DIFF_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_DIFF_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_DIFF_TIMEOUT_SECS),
    }
}
