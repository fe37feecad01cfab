use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Which relationship listing a fetch was reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Followers,
    Following,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Followers => write!(f, "followers"),
            ListKind::Following => write!(f, "following"),
        }
    }
}

/// Errors that abort a run.
#[derive(Error, Debug)]
pub enum CoreError {
    /// The configured username is not a valid GitHub login.
    #[error("Invalid GitHub username '{value}': {reason}")]
    InvalidIdentity { value: String, reason: String },

    /// A relationship listing could not be retrieved in full.
    #[error("Failed to retrieve the {list} list: {source}")]
    Fetch {
        list: ListKind,
        source: github_client::Error,
    },

    /// The results could not be written.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors raised while writing results to disk.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write results to '{}': {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
}
