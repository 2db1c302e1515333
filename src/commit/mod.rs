//! Commit proposals and conventional commit messages.

pub mod json;
pub mod message;

pub use json::extract_json;
pub use message::{CommitProposal, MAX_BODY_LINES, MAX_HEADER_LENGTH, format_message};
