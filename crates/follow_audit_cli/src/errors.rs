use follow_audit_core::{CoreError, ExportError};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the follow-audit CLI.
///
/// Every variant is fatal for the run: the message is printed and the process
/// exits with a non-zero status.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable GitHub token, or GitHub rejected it.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The configuration file could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A flag or configured value is not acceptable.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The GitHub client could not be constructed.
    #[error("Failed to set up the GitHub client: {0}")]
    Client(#[source] github_client::Error),

    /// A follower or following listing could not be retrieved.
    #[error("{0}")]
    Fetch(#[source] CoreError),

    /// The results could not be written to the output file.
    #[error("{0}")]
    Export(#[source] ExportError),
}

impl From<CoreError> for Error {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidIdentity { .. } => Error::InvalidArguments(e.to_string()),
            CoreError::Fetch {
                source: github_client::Error::AuthenticationFailure,
                ..
            } => Error::Auth(e.to_string()),
            CoreError::Fetch { .. } => Error::Fetch(e),
            CoreError::Export(inner) => Error::Export(inner),
        }
    }
}

impl From<ExportError> for Error {
    fn from(e: ExportError) -> Self {
        Error::Export(e)
    }
}
