//! Working-tree access through the git executable.

pub mod changes;
pub mod executor;
pub mod status;

pub use changes::{ChangeInterface, CommitOutcome, SHORT_HASH_LENGTH};
pub use executor::{GitExecutor, SystemGit, check_git_installed};
pub use status::{GitFile, parse_porcelain, parse_status_line, summarize};
