//! gitbrief - working-tree change capture and conventional commit synthesis.
//!
//! # Overview
//!
//! gitbrief lists a repository's uncommitted changes, renders them as a
//! fixed-width summary for an external reviewer (human or LLM), and turns the
//! reviewer's [`CommitProposal`] into a conventional commit message and a
//! commit. All repository access goes through the `git` executable.

pub mod commit;
pub mod config;
pub mod error;
pub mod git;

// Re-export commonly used types
pub use commit::{CommitProposal, format_message};
pub use config::ChangeConfig;
pub use error::{GitError, ProposalError};
pub use git::{ChangeInterface, CommitOutcome, GitFile, summarize};
