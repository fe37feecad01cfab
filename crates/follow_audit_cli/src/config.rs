//! Configuration management for the follow-audit CLI.
//!
//! Settings come from three places, in decreasing precedence: command-line
//! flags, a TOML configuration file, and built-in defaults. The GitHub token is
//! never stored in the file; it is read from the environment.

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use follow_audit_core::{EnrichSettings, Identity, RunConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "follow-audit.toml";

/// Environment variables checked for the GitHub token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_PAT", "GITHUB_TOKEN"];

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Contents of the configuration file.
///
/// # Example TOML Configuration
///
/// ```toml
/// [github]
/// api_base_url = "https://api.github.com"
/// username = "octocat"
/// timeout_secs = 30
///
/// [enrichment]
/// threshold = 1
/// delay_ms = 500
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// does not parse.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration the user asked for.
    ///
    /// An explicit path must exist. When no path is given the default file in
    /// the current directory is used if present, otherwise built-in defaults.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);
        if config_path.is_none() && !path.exists() {
            debug!("No configuration file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Saves the configuration as pretty TOML, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization or any filesystem step fails.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

/// The `[github]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "GitHubConfig::default_api_base_url")]
    pub api_base_url: String,

    /// Account to audit. May be overridden with `--username`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default = "GitHubConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl GitHubConfig {
    fn default_api_base_url() -> String {
        github_client::GITHUB_API_BASE_URL.to_string()
    }

    fn default_timeout_secs() -> u64 {
        github_client::DEFAULT_TIMEOUT.as_secs()
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: Self::default_api_base_url(),
            username: None,
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// The `[enrichment]` section, used by `low-repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "EnrichmentConfig::default_threshold")]
    pub threshold: u64,

    #[serde(default = "EnrichmentConfig::default_delay_ms")]
    pub delay_ms: u64,
}

impl EnrichmentConfig {
    fn default_threshold() -> u64 {
        follow_audit_core::enricher::DEFAULT_THRESHOLD
    }

    fn default_delay_ms() -> u64 {
        follow_audit_core::enricher::DEFAULT_DELAY.as_millis() as u64
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            delay_ms: Self::default_delay_ms(),
        }
    }
}

/// Flag values that take precedence over the configuration file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub username: Option<String>,
    pub threshold: Option<u64>,
    pub delay_ms: Option<u64>,
}

/// Resolves the path to the configuration file.
///
/// Uses `config_path` when given, otherwise `follow-audit.toml` in the
/// current directory.
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}

/// Reads the GitHub token from `GITHUB_PAT`, falling back to `GITHUB_TOKEN`.
///
/// Blank values are treated as unset.
///
/// # Errors
///
/// Returns `Error::Auth` if neither variable holds a token.
pub fn credential_from_env() -> Result<SecretString, Error> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            Error::Auth(format!(
                "No GitHub token found. Set {} (or {}) to a personal access token",
                TOKEN_ENV_VARS[0], TOKEN_ENV_VARS[1]
            ))
        })
}

/// Combines file settings, flag overrides and the credential into a [`RunConfig`].
///
/// # Errors
///
/// Returns `Error::InvalidArguments` when no username is configured or it is
/// not a valid login, and `Error::Config` for an unusable base URL or timeout.
pub fn build_run_config(
    config: &AppConfig,
    overrides: &Overrides,
    credential: SecretString,
) -> Result<RunConfig, Error> {
    let username = overrides
        .username
        .as_deref()
        .or(config.github.username.as_deref())
        .ok_or_else(|| {
            Error::InvalidArguments(
                "No GitHub username given. Pass --username or set github.username in the configuration file".to_string(),
            )
        })?;
    let identity = Identity::parse(username)?;

    let api_base_url = Url::parse(&config.github.api_base_url).map_err(|e| {
        Error::Config(format!(
            "Invalid api_base_url '{}': {}",
            config.github.api_base_url, e
        ))
    })?;

    if config.github.timeout_secs == 0 {
        return Err(Error::Config(
            "timeout_secs must be greater than zero".to_string(),
        ));
    }

    let enrichment = EnrichSettings {
        threshold: overrides.threshold.unwrap_or(config.enrichment.threshold),
        delay: Duration::from_millis(overrides.delay_ms.unwrap_or(config.enrichment.delay_ms)),
    };

    Ok(RunConfig {
        api_base_url,
        identity,
        credential,
        timeout: Duration::from_secs(config.github.timeout_secs),
        enrichment,
    })
}
