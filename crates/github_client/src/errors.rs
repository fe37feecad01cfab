//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when reading follower,
//! following and user detail data from the GitHub REST API. Callers decide
//! whether an error is fatal: a failed list fetch aborts a run, a failed detail
//! lookup only skips that user.

use crate::rate_limit::RateLimitInfo;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.list_followers("octocat", LoginCase::Lowercase).await {
///     Ok(logins) => println!("{} followers", logins.len()),
///     Err(Error::AuthenticationFailure) => eprintln!("Token rejected"),
///     Err(Error::RateLimitOrForbidden { rate_limit }) => eprintln!("Blocked: {rate_limit}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub rejected the credential (HTTP 401).
    ///
    /// Not retryable without a new token.
    #[error("Authentication failed (401): check that the token is valid and has the 'read:user' scope")]
    AuthenticationFailure,

    /// The request was forbidden, usually because the rate limit was exhausted (HTTP 403).
    ///
    /// Carries whatever quota information GitHub returned in the response headers.
    #[error("Forbidden or rate limit exceeded (403): {rate_limit}")]
    RateLimitOrForbidden {
        /// Quota values read from the `X-RateLimit-*` headers.
        rate_limit: RateLimitInfo,
    },

    /// Any other non-200 status code.
    #[error("Unexpected status code {code}: {body}")]
    UnexpectedStatus {
        /// The HTTP status code.
        code: u16,
        /// The raw response body.
        body: String,
    },

    /// A response record did not contain a field the client needs.
    #[error("Response is missing the '{0}' field")]
    MissingField(&'static str),

    /// The request never produced a response (connection, TLS, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request URI could not be constructed.
    #[error("Invalid request URI: {0}")]
    InvalidUri(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to initialize GitHub client: {0}")]
    ClientBuild(String),
}

impl Error {
    /// Returns the HTTP status code behind this error, if there was one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::AuthenticationFailure => Some(401),
            Error::RateLimitOrForbidden { .. } => Some(403),
            Error::UnexpectedStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}
