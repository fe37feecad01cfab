use std::time::Duration;

use github_client::{create_token_client, GitHubClient};
use secrecy::SecretString;
use url::Url;

use crate::{enricher::EnrichSettings, identity::Identity};

#[cfg(test)]
#[path = "run_config_tests.rs"]
mod tests;

/// Everything a single run needs, resolved once at start-up.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base of the REST API, e.g. `https://api.github.com`.
    pub api_base_url: Url,
    /// The account being audited.
    pub identity: Identity,
    /// Token sent as `Authorization: token <credential>`.
    pub credential: SecretString,
    /// Connect and read timeout for every request.
    pub timeout: Duration,
    pub enrichment: EnrichSettings,
}

impl RunConfig {
    /// Base URL without a trailing slash, ready to prefix `/users/...` paths.
    pub fn api_base(&self) -> &str {
        self.api_base_url.as_str().trim_end_matches('/')
    }

    /// Builds a GitHub client carrying this run's credential and timeout.
    ///
    /// # Errors
    /// Returns the client error if the HTTP client cannot be constructed.
    pub fn build_client(&self) -> Result<GitHubClient, github_client::Error> {
        let octocrab = create_token_client(self.api_base(), &self.credential, self.timeout)?;
        Ok(GitHubClient::new(octocrab))
    }
}
