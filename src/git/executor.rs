//! Git process spawning.
//!
//! All repository access goes through [`GitExecutor`], so operations can be
//! tested against a mock instead of a real repository.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::error::GitError;

/// Trait for running git subcommands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run git with `args` and return its stdout.
    ///
    /// A non-zero exit is an error carrying the captured stderr. When `limit`
    /// is set, exceeding it yields [`GitError::Timeout`] and the child is killed.
    async fn run(&self, args: Vec<String>, limit: Option<Duration>) -> Result<String, GitError>;
}

/// Executor that spawns the real git binary inside a project root.
#[derive(Debug, Clone)]
pub struct SystemGit {
    binary: String,
    root: PathBuf,
}

impl SystemGit {
    pub fn new(binary: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl GitExecutor for SystemGit {
    async fn run(&self, args: Vec<String>, limit: Option<Duration>) -> Result<String, GitError> {
        let command = args.join(" ");
        debug!("Running `{} {}` in {}", self.binary, command, self.root.display());

        let mut cmd = Command::new(&self.binary);
        cmd.args(&args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let started = Instant::now();
        let result = match limit {
            Some(limit) => timeout(limit, cmd.output())
                .await
                .map_err(|_| GitError::Timeout {
                    command: command.clone(),
                    limit,
                })?,
            None => cmd.output().await,
        };

        let output = result.map_err(|e| {
            // A missing cwd also surfaces as NotFound.
            if e.kind() == std::io::ErrorKind::NotFound && self.root.is_dir() {
                GitError::NotInstalled(self.binary.clone())
            } else {
                GitError::SpawnFailed(e)
            }
        })?;

        debug!(
            "`git {}` finished with {:?} in {:?}",
            command,
            output.status.code(),
            started.elapsed()
        );

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Check that the git binary is installed and runs.
///
/// Uses the `which` crate for cross-platform executable detection, then
/// runs `--version`.
pub async fn check_git_installed(binary: &str) -> Result<(), GitError> {
    if which::which(binary).is_err() {
        return Err(GitError::NotInstalled(binary.to_string()));
    }

    let version_check = Command::new(binary)
        .arg("--version")
        .output()
        .await
        .map_err(GitError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(GitError::NotInstalled(binary.to_string()));
    }

    Ok(())
}
