//! Commit proposals and conventional commit message formatting.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::commit::json::extract_json;
use crate::error::ProposalError;

/// Hard cap on the header line, in characters.
pub const MAX_HEADER_LENGTH: usize = 72;

/// Marker appended to a truncated header.
const ELLIPSIS: &str = "...";

/// Body entries kept in the formatted message; the rest are dropped.
pub const MAX_BODY_LINES: usize = 5;

/// A commit decision produced outside this crate (by a person or an LLM).
///
/// Only read here: `files` is never checked against the working tree.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommitProposal {
    /// Commit category tag, e.g. `feat`, `fix`, `docs`. Open vocabulary.
    #[serde(rename = "type")]
    pub commit_type: String,
    #[serde(default)]
    pub scope: String,
    pub subject: String,
    /// Rationale/detail lines, in order.
    #[serde(default)]
    pub body: Vec<String>,
    /// Paths the proposal claims to cover.
    #[serde(default)]
    pub files: Vec<String>,
}

impl CommitProposal {
    pub fn new(
        commit_type: impl Into<String>,
        scope: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            commit_type: commit_type.into(),
            scope: scope.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a proposal from JSON, tolerating markdown fences or prose around it.
    pub fn from_json(text: &str) -> Result<Self, ProposalError> {
        serde_json::from_str(extract_json(text))
            .map_err(|e| ProposalError::InvalidJson(e.to_string()))
    }

    /// Read a proposal from a file, or from stdin when `path` is `-`.
    pub fn from_path(path: &Path) -> Result<Self, ProposalError> {
        let text = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(ProposalError::ReadFailed)?;
            buf
        } else {
            std::fs::read_to_string(path).map_err(ProposalError::ReadFailed)?
        };
        Self::from_json(&text)
    }

    /// The `type(scope): subject` line, capped at [`MAX_HEADER_LENGTH`].
    ///
    /// Over-long headers keep their first 69 characters plus `...`. The cut
    /// is by character, with no word-boundary handling.
    pub fn header(&self) -> String {
        let header = format!("{}({}): {}", self.commit_type, self.scope, self.subject);
        if header.chars().count() <= MAX_HEADER_LENGTH {
            return header;
        }

        let mut truncated: String = header
            .chars()
            .take(MAX_HEADER_LENGTH - ELLIPSIS.len())
            .collect();
        truncated.push_str(ELLIPSIS);
        truncated
    }

    /// Format the full commit message.
    ///
    /// Produces:
    /// ```text
    /// type(scope): subject
    ///
    /// first body line
    /// ...up to five body lines
    /// ```
    ///
    /// The blank separator line is always present, so an empty body yields
    /// `"type(scope): subject\n\n"`.
    pub fn format(&self) -> String {
        let body: Vec<&str> = self
            .body
            .iter()
            .take(MAX_BODY_LINES)
            .map(String::as_str)
            .collect();
        format!("{}\n\n{}", self.header(), body.join("\n"))
    }
}

/// Format `proposal` as a commit message. See [`CommitProposal::format`].
pub fn format_message(proposal: &CommitProposal) -> String {
    proposal.format()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> CommitProposal {
        CommitProposal::new("feat", "auth", "add login endpoint")
    }

    #[test]
    fn test_header_composition() {
        assert_eq!(proposal().header(), "feat(auth): add login endpoint");
    }

    #[test]
    fn test_header_truncated_to_exactly_72() {
        let p = CommitProposal::new("feat", "core", "x".repeat(100));
        let header = p.header();
        assert_eq!(header.chars().count(), 72);
        assert!(header.ends_with("..."));
        assert!(header.starts_with("feat(core): xxx"));
    }

    #[test]
    fn test_header_at_limit_is_untouched() {
        // "fix(io): " is 9 characters.
        let p = CommitProposal::new("fix", "io", "y".repeat(63));
        assert_eq!(p.header().chars().count(), 72);
        assert!(!p.header().ends_with("..."));
    }

    #[test]
    fn test_header_one_over_limit_is_truncated() {
        let p = CommitProposal::new("fix", "io", "y".repeat(64));
        let header = p.header();
        assert_eq!(header.chars().count(), 72);
        assert_eq!(&header[69..], "...");
    }

    #[test]
    fn test_header_truncation_counts_characters_not_bytes() {
        let p = CommitProposal::new("docs", "i18n", "é".repeat(80));
        let header = p.header();
        assert_eq!(header.chars().count(), 72);
        assert!(header.ends_with("..."));
    }

    #[test]
    fn test_format_with_body() {
        let p = proposal().with_body(["- add POST /login", "- hash passwords with argon2"]);
        assert_eq!(
            p.format(),
            "feat(auth): add login endpoint\n\n- add POST /login\n- hash passwords with argon2"
        );
    }

    #[test]
    fn test_format_caps_body_at_five_lines() {
        let lines: Vec<String> = (1..=8).map(|i| format!("line {i}")).collect();
        let formatted = proposal().with_body(lines).format();

        for i in 1..=5 {
            assert!(formatted.contains(&format!("line {i}")));
        }
        for i in 6..=8 {
            assert!(!formatted.contains(&format!("line {i}")));
        }
        assert!(formatted.ends_with("line 5"));
        let body: Vec<&str> = formatted.lines().skip(2).collect();
        assert_eq!(body, vec!["line 1", "line 2", "line 3", "line 4", "line 5"]);
    }

    #[test]
    fn test_format_empty_body_keeps_blank_line() {
        assert_eq!(proposal().format(), "feat(auth): add login endpoint\n\n");
    }

    #[test]
    fn test_format_is_idempotent() {
        let p = CommitProposal::new("refactor", "git", "z".repeat(90))
            .with_body((0..7).map(|i| format!("detail {i}")));
        assert_eq!(p.format(), p.format());
        assert_eq!(format_message(&p), p.format());
    }

    #[test]
    fn test_empty_subject_still_formats() {
        let p = CommitProposal::new("chore", "deps", "");
        assert_eq!(p.format(), "chore(deps): \n\n");
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "type": "fix",
            "scope": "parser",
            "subject": "handle renames",
            "body": ["keep arrow verbatim"],
            "files": ["src/git/status.rs"]
        }"#;
        let p = CommitProposal::from_json(json).unwrap();
        assert_eq!(p.commit_type, "fix");
        assert_eq!(p.scope, "parser");
        assert_eq!(p.body, vec!["keep arrow verbatim"]);
        assert_eq!(p.files, vec!["src/git/status.rs"]);
    }

    #[test]
    fn test_from_json_defaults_optional_fields() {
        let p = CommitProposal::from_json(r#"{"type": "docs", "subject": "fix typo"}"#).unwrap();
        assert!(p.scope.is_empty());
        assert!(p.body.is_empty());
        assert!(p.files.is_empty());
    }

    #[test]
    fn test_from_json_inside_markdown_fence() {
        let text = "Here you go:\n```json\n{\"type\": \"feat\", \"scope\": \"cli\", \"subject\": \"add diff\"}\n```";
        let p = CommitProposal::from_json(text).unwrap();
        assert_eq!(p.header(), "feat(cli): add diff");
    }

    #[test]
    fn test_from_json_missing_subject_is_error() {
        let result = CommitProposal::from_json(r#"{"type": "feat"}"#);
        assert!(matches!(result, Err(ProposalError::InvalidJson(_))));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal.json");
        std::fs::write(&path, r#"{"type": "test", "scope": "git", "subject": "cover push"}"#)
            .unwrap();
        let p = CommitProposal::from_path(&path).unwrap();
        assert_eq!(p.commit_type, "test");
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = CommitProposal::from_path(Path::new("/nonexistent/proposal.json"));
        assert!(matches!(result, Err(ProposalError::ReadFailed(_))));
    }

    #[test]
    fn test_serializes_type_field_name() {
        let json = serde_json::to_value(proposal()).unwrap();
        assert_eq!(json["type"], "feat");
        assert!(json.get("commit_type").is_none());
    }
}
