//! Fakes and fixtures for the command tests.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use follow_audit_core::{EnrichSettings, Identity, RunConfig};
use github_client::{Error, LoginCase, UserDetails, UserDirectory};
use secrecy::SecretString;
use url::Url;

/// Directory backed by fixed lists and repository counts.
///
/// Logins missing from `repos` fail their detail lookup with a 404.
#[derive(Default)]
pub struct StaticDirectory {
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub repos: HashMap<String, u64>,
    pub fail_lists_with_401: bool,
}

impl StaticDirectory {
    pub fn new(followers: &[&str], following: &[&str]) -> Self {
        Self {
            followers: followers.iter().map(|s| s.to_string()).collect(),
            following: following.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_repos(mut self, login: &str, count: u64) -> Self {
        self.repos.insert(login.to_string(), count);
        self
    }
}

#[async_trait]
impl UserDirectory for StaticDirectory {
    async fn list_followers(&self, _identity: &str, case: LoginCase) -> Result<Vec<String>, Error> {
        if self.fail_lists_with_401 {
            return Err(Error::AuthenticationFailure);
        }
        Ok(self.followers.iter().map(|l| case.apply(l)).collect())
    }

    async fn list_following(&self, _identity: &str, case: LoginCase) -> Result<Vec<String>, Error> {
        if self.fail_lists_with_401 {
            return Err(Error::AuthenticationFailure);
        }
        Ok(self.following.iter().map(|l| case.apply(l)).collect())
    }

    async fn get_user_details(&self, login: &str) -> Result<UserDetails, Error> {
        match self.repos.get(login) {
            Some(count) => Ok(UserDetails {
                login: login.to_string(),
                public_repos: Some(*count),
            }),
            None => Err(Error::UnexpectedStatus {
                code: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}

/// A run configuration for `octocat` with no enrichment delay.
pub fn run_config(threshold: u64) -> RunConfig {
    RunConfig {
        api_base_url: Url::parse("http://127.0.0.1:1").unwrap(),
        identity: Identity::parse("octocat").unwrap(),
        credential: SecretString::from("ghp_test".to_string()),
        timeout: Duration::from_secs(1),
        enrichment: EnrichSettings {
            threshold,
            delay: Duration::ZERO,
        },
    }
}
