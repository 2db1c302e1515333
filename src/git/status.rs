//! Porcelain status parsing and the fixed-width change summary.

use serde::Serialize;
use tracing::warn;

/// One entry in the working-tree status listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitFile {
    /// Change code: `M`, `A`, `D`, `R`, `??`, or an index/worktree pair like `MM`.
    pub status: String,
    /// Repository-relative path. Rename entries keep `old -> new` verbatim.
    ///
    /// Git quotes paths with spaces or non-ASCII bytes (`"a b.txt"`,
    /// `"\303\251.txt"`); those quotes and escapes are kept as-is, so such a
    /// path must be unquoted before it is handed back to `git add`.
    pub path: String,
}

impl GitFile {
    pub fn new(status: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            path: path.into(),
        }
    }

    pub fn is_untracked(&self) -> bool {
        self.status == "??"
    }
}

/// Parse a single `git status --porcelain` line.
///
/// The first two characters are the status (trimmed, so ` M` becomes `M`).
/// The path starts at offset 3, or at offset 2 with leading whitespace
/// trimmed when the line is too short for the fixed layout. Returns `None`
/// for lines that yield an empty status or path.
///
/// Quoted paths are not unquoted; see [`GitFile::path`].
pub fn parse_status_line(line: &str) -> Option<GitFile> {
    if line.trim().is_empty() {
        return None;
    }

    let status = line.get(..2).unwrap_or(line).trim();
    let path = if line.len() > 3 {
        line.get(3..)
    } else {
        line.get(2..).map(str::trim_start)
    }
    .unwrap_or("");

    if status.is_empty() || path.is_empty() {
        warn!("Skipping malformed status line: {:?}", line);
        return None;
    }

    Some(GitFile::new(status, path))
}

/// Parse the full porcelain output, preserving git's ordering.
pub fn parse_porcelain(output: &str) -> Vec<GitFile> {
    // Leading spaces are significant (` M` = unstaged modification), so the
    // output is split as-is rather than trimmed first.
    output.lines().filter_map(parse_status_line).collect()
}

/// Render files as `[<status>] <path>` lines with the status left-justified
/// to width 2.
///
/// This is the format handed to the semantic-analysis collaborator, which
/// reads the status field positionally.
pub fn summarize(files: &[GitFile]) -> String {
    files
        .iter()
        .map(|f| format!("[{:<2}] {}", f.status, f.path))
        .collect::<Vec<_>>()
        .join("\n")
}
