//! Crate for reading the GitHub social graph over the REST API.
//!
//! This crate provides a client that lists the followers and followed accounts
//! of a user, following page-index pagination until GitHub reports no further
//! pages, and looks up individual user details. Requests are authenticated with
//! a personal access token sent as `Authorization: token <credential>`.
//!
//! A failure on any page aborts the whole listing: the client never returns a
//! partial list. No request is retried automatically.

use std::time::Duration;

use async_trait::async_trait;
use http::{
    header::{ACCEPT, AUTHORIZATION},
    HeaderMap, StatusCode,
};
use octocrab::{service::middleware::retry::RetryConfig, Octocrab};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, instrument, warn};

pub mod errors;
pub use errors::Error;

pub mod pagination;
pub use pagination::{has_next_page, parse_link_header, LinkRelation, LoginCase, PageCursor};

pub mod rate_limit;
pub use rate_limit::RateLimitInfo;

pub mod user;
pub use user::{UserDetails, UserRecord};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Base URL of the public GitHub REST API.
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// Media type pinned to version 3 of the REST API.
pub const GITHUB_ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

/// Connect and read timeout applied when the caller does not choose one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for reading follower relationships and user details.
#[derive(Debug)]
pub struct GitHubClient {
    client: Octocrab,
}

/// Status, headers and body of a response, captured before the status is judged.
struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` from a configured `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build an instance with the expected
    /// authorization and media type headers.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Fetches every login from a paginated user listing.
    ///
    /// Starts at page 1 with 100 records per page. The listing ends when a page
    /// is empty or when the response carries no `Link` header with a `next`
    /// relation.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - The API path of the listing, e.g. `/users/octocat/followers`.
    /// * `case` - Whether logins are lower-cased or kept as returned.
    ///
    /// # Returns
    ///
    /// The logins in the order GitHub returned them. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `Error::AuthenticationFailure` on a 401 response
    /// - `Error::RateLimitOrForbidden` on a 403 response
    /// - `Error::UnexpectedStatus` on any other non-200 response
    /// - `Error::Transport` if no response was received
    /// - `Error::Deserialization` if a page is not a list of users
    ///
    /// Records from pages fetched before the failure are discarded.
    #[instrument(skip(self), fields(endpoint = %endpoint, case = ?case))]
    pub async fn fetch_user_pages(
        &self,
        endpoint: &str,
        case: LoginCase,
    ) -> Result<Vec<String>, Error> {
        let mut logins = Vec::new();
        let mut cursor = PageCursor::first();

        loop {
            debug!(
                page = cursor.page,
                per_page = cursor.per_page,
                "Fetching page {} of {}",
                cursor.page,
                endpoint
            );

            let response = self.send_get(&cursor.apply_to(endpoint)).await?;
            ensure_success(&response)?;

            let page: Vec<UserRecord> = serde_json::from_str(&response.body).map_err(|e| {
                error!(
                    page = cursor.page,
                    error = %e,
                    "Page body is not a list of users"
                );
                Error::Deserialization(e)
            })?;

            if page.is_empty() {
                debug!(page = cursor.page, "Empty page, listing complete");
                break;
            }

            debug!(
                page = cursor.page,
                count = page.len(),
                "Retrieved {} users on page {}",
                page.len(),
                cursor.page
            );
            logins.extend(page.into_iter().map(|user| case.apply(&user.login)));

            if !has_next_page(&response.headers) {
                debug!(page = cursor.page, "No next link, listing complete");
                break;
            }

            cursor.advance();
        }

        info!(
            endpoint = endpoint,
            count = logins.len(),
            pages = cursor.page,
            "Fetched user listing"
        );

        Ok(logins)
    }

    /// Fetches the details of a single user.
    ///
    /// # Errors
    ///
    /// Returns the same status and transport errors as [`Self::fetch_user_pages`],
    /// and `Error::MissingField` if the payload has no `public_repos` field.
    #[instrument(skip(self), fields(login = %login))]
    pub async fn get_user_details(&self, login: &str) -> Result<UserDetails, Error> {
        let response = self.send_get(&format!("/users/{login}")).await?;
        ensure_success(&response)?;

        let details: UserDetails = serde_json::from_str(&response.body)?;
        let repo_count = details.repo_count()?;

        debug!(
            login = login,
            public_repos = repo_count,
            "Retrieved user details"
        );

        Ok(details)
    }

    async fn send_get(&self, uri: &str) -> Result<RawResponse, Error> {
        let response = self.client._get(uri).await.map_err(|e| {
            let mapped = match &e {
                octocrab::Error::UriParse { .. } | octocrab::Error::Uri { .. } => {
                    Error::InvalidUri(format!("{uri}: {e}"))
                }
                _ => Error::Transport(e.to_string()),
            };
            log_octocrab_error("Failed to send GitHub request", e);
            mapped
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = self.client.body_to_string(response).await.map_err(|e| {
            let message = e.to_string();
            log_octocrab_error("Failed to read GitHub response body", e);
            Error::Transport(message)
        })?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Read access to the parts of the GitHub user graph this tool needs.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Lists the accounts following `identity`.
    ///
    /// # Errors
    /// Any failure on any page aborts the listing.
    async fn list_followers(&self, identity: &str, case: LoginCase) -> Result<Vec<String>, Error>;

    /// Lists the accounts `identity` follows.
    ///
    /// # Errors
    /// Any failure on any page aborts the listing.
    async fn list_following(&self, identity: &str, case: LoginCase) -> Result<Vec<String>, Error>;

    /// Looks up a single user.
    ///
    /// # Errors
    /// Returns an error for non-200 responses, transport failures and payloads
    /// without a `public_repos` field.
    async fn get_user_details(&self, login: &str) -> Result<UserDetails, Error>;
}

#[async_trait]
impl UserDirectory for GitHubClient {
    async fn list_followers(&self, identity: &str, case: LoginCase) -> Result<Vec<String>, Error> {
        self.fetch_user_pages(&format!("/users/{identity}/followers"), case)
            .await
    }

    async fn list_following(&self, identity: &str, case: LoginCase) -> Result<Vec<String>, Error> {
        self.fetch_user_pages(&format!("/users/{identity}/following"), case)
            .await
    }

    async fn get_user_details(&self, login: &str) -> Result<UserDetails, Error> {
        // Delegate to the existing implementation
        self.get_user_details(login).await
    }
}

/// Creates an `Octocrab` client that sends a personal access token on every request.
///
/// The token is sent as `Authorization: token <credential>` together with an
/// `Accept` header pinned to the v3 media type. Automatic retries are disabled
/// and `timeout` is used for both connecting and reading.
///
/// # Errors
///
/// Returns `Error::InvalidUri` if `api_base_url` is not a valid URI and
/// `Error::ClientBuild` if the client cannot be constructed.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, GitHubClient, GITHUB_API_BASE_URL, DEFAULT_TIMEOUT};
/// use secrecy::SecretString;
///
/// # fn example() -> Result<(), github_client::Error> {
/// let token = SecretString::from(std::env::var("GITHUB_PAT").unwrap_or_default());
/// let octocrab = create_token_client(GITHUB_API_BASE_URL, &token, DEFAULT_TIMEOUT)?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(
    api_base_url: &str,
    token: &SecretString,
    timeout: Duration,
) -> Result<Octocrab, Error> {
    Octocrab::builder()
        .base_uri(api_base_url)
        .map_err(|e| {
            error!(api_base_url = api_base_url, error = %e, "Invalid API base URL");
            Error::InvalidUri(format!("{api_base_url}: {e}"))
        })?
        .add_header(AUTHORIZATION, format!("token {}", token.expose_secret()))
        .add_header(ACCEPT, GITHUB_ACCEPT_HEADER.to_string())
        .add_retry_config(RetryConfig::None)
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout))
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to build GitHub client");
            Error::ClientBuild(e.to_string())
        })
}

fn ensure_success(response: &RawResponse) -> Result<(), Error> {
    match response.status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => {
            error!("GitHub rejected the token (401)");
            Err(Error::AuthenticationFailure)
        }
        StatusCode::FORBIDDEN => {
            let rate_limit = RateLimitInfo::from_headers(&response.headers);
            warn!(
                remaining = ?rate_limit.remaining,
                reset_at = ?rate_limit.reset_at,
                "GitHub refused the request (403)"
            );
            Err(Error::RateLimitOrForbidden { rate_limit })
        }
        status => {
            error!(status = status.as_u16(), "Unexpected status from GitHub");
            Err(Error::UnexpectedStatus {
                code: status.as_u16(),
                body: response.body.clone(),
            })
        }
    }
}

fn log_octocrab_error(message: &str, e: octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => {
            let err = source;
            error!(
                error_message = err.message,
                backtrace = backtrace.to_string(),
                "{}. Received an error from GitHub",
                message
            )
        }
        octocrab::Error::UriParse { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidUtf8 { source, backtrace } => error!(
            error_message = source.to_string(),
            backtrace = backtrace.to_string(),
            "{}. The message wasn't valid UTF-8.",
            message,
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
