//! The repository change interface: list, diff, stage, commit, push.
//!
//! Each operation runs its git invocations one after another in the project
//! root and adds no locking of its own; concurrent writers race on git's
//! `index.lock`. Only diff retrieval is time-bounded.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::commit::CommitProposal;
use crate::config::ChangeConfig;
use crate::error::GitError;

use super::executor::{GitExecutor, SystemGit};
use super::status::{GitFile, parse_porcelain};

/// Length of the abbreviated commit hash returned by [`ChangeInterface::commit`].
pub const SHORT_HASH_LENGTH: usize = 7;

/// Result of applying a [`CommitProposal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub short_hash: String,
    pub message: String,
    /// Paths passed to `git add` (empty when staging was skipped).
    pub staged: Vec<String>,
}

/// Git access for one project root.
pub struct ChangeInterface<E = SystemGit> {
    config: ChangeConfig,
    executor: E,
}

impl ChangeInterface<SystemGit> {
    /// Interface backed by the real git binary named in `config`.
    pub fn new(config: ChangeConfig) -> Self {
        let executor = SystemGit::new(config.git_binary.clone(), config.project_root.clone());
        Self { config, executor }
    }
}

impl<E: GitExecutor> ChangeInterface<E> {
    pub fn with_executor(config: ChangeConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &ChangeConfig {
        &self.config
    }

    async fn git(&self, args: &[&str], limit: Option<Duration>) -> Result<String, GitError> {
        let args = args.iter().map(|a| a.to_string()).collect();
        self.executor.run(args, limit).await
    }

    /// List working-tree changes via `git status --porcelain`.
    ///
    /// Any git failure is returned as-is; no partial list is produced.
    pub async fn list_changes(&self) -> Result<Vec<GitFile>, GitError> {
        let output = self.git(&["status", "--porcelain"], None).await?;
        let files = parse_porcelain(&output);
        debug!("Found {} changed files", files.len());
        Ok(files)
    }

    /// Unified diff of the working tree against HEAD, optionally for one path.
    ///
    /// Bounded by the configured diff timeout; exceeding it returns
    /// [`GitError::Timeout`], which callers must not read as "no changes".
    /// Undecodable bytes are replaced rather than rejected.
    pub async fn get_diff(&self, path: Option<&str>) -> Result<String, GitError> {
        let mut args = vec!["diff", "HEAD"];
        if let Some(path) = path {
            args.extend(["--", path]);
        }
        self.git(&args, Some(self.config.diff_timeout)).await
    }

    /// Stage `paths` with `git add`, keeping git's diagnostic on failure.
    ///
    /// Paths follow a `--` separator, so a name like `-A` is staged as a
    /// file rather than read as an option.
    pub async fn try_stage<S: AsRef<str>>(&self, paths: &[S]) -> Result<(), GitError> {
        if paths.is_empty() {
            return Err(GitError::InvalidArguments("no paths to stage".into()));
        }

        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(|p| p.as_ref()));
        self.git(&args, None).await?;
        Ok(())
    }

    /// Stage `paths`. Returns `false` on any failure.
    ///
    /// Git reports failures in aggregate, so there is no way to tell which
    /// path was rejected.
    pub async fn stage<S: AsRef<str>>(&self, paths: &[S]) -> bool {
        match self.try_stage(paths).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Staging failed: {}", e);
                false
            }
        }
    }

    /// Commit the index with `message` and return the 7-character HEAD hash.
    ///
    /// Git's own policy applies when nothing is staged: `git commit` fails
    /// with "nothing to commit" and no empty commit is created, since
    /// `--allow-empty` is never passed.
    pub async fn try_commit(&self, message: &str) -> Result<String, GitError> {
        if message.trim().is_empty() {
            return Err(GitError::InvalidArguments("empty commit message".into()));
        }

        self.git(&["commit", "-m", message], None).await?;

        let output = self.git(&["rev-parse", "HEAD"], None).await?;
        let hash = output.trim();
        if hash.len() < SHORT_HASH_LENGTH || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitError::UnexpectedOutput {
                command: "rev-parse HEAD".into(),
                output: output.clone(),
            });
        }

        let short = hash[..SHORT_HASH_LENGTH].to_string();
        info!("Created commit {}", short);
        Ok(short)
    }

    /// Commit with `message`. `None` means the commit did not happen.
    pub async fn commit(&self, message: &str) -> Option<String> {
        match self.try_commit(message).await {
            Ok(hash) => Some(hash),
            Err(e) => {
                warn!("Commit failed: {}", e);
                None
            }
        }
    }

    /// Run `git push` against the configured upstream.
    pub async fn try_push(&self) -> Result<(), GitError> {
        self.git(&["push"], None).await?;
        Ok(())
    }

    /// Push. Every failure (rejection, no upstream, network) is `false`.
    pub async fn push(&self) -> bool {
        match self.try_push().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Push failed: {}", e);
                false
            }
        }
    }

    /// Stage the proposal's files (when it lists any) and commit its message.
    pub async fn apply_proposal(
        &self,
        proposal: &CommitProposal,
    ) -> Result<CommitOutcome, GitError> {
        if !proposal.files.is_empty() {
            self.try_stage(proposal.files.as_slice()).await?;
        }

        let message = proposal.format();
        let short_hash = self.try_commit(&message).await?;

        Ok(CommitOutcome {
            short_hash,
            message,
            staged: proposal.files.clone(),
        })
    }
}
