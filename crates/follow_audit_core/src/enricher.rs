//! Per-user detail lookups for the accounts the target follows.
//!
//! Lookups run one at a time with a fixed pause between them. A failed lookup
//! skips that login; it never aborts the batch.

use std::time::Duration;

use github_client::{LoginCase, UserDirectory};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    errors::{CoreError, ListKind},
    identity::Identity,
};

#[cfg(test)]
#[path = "enricher_tests.rs"]
mod tests;

/// Default repository-count threshold.
pub const DEFAULT_THRESHOLD: u64 = 1;

/// Default pause between detail lookups.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Tuning for an enrichment batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrichSettings {
    /// Users with at most this many public repositories are reported.
    pub threshold: u64,
    /// Pause between consecutive lookups.
    pub delay: Duration,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            delay: DEFAULT_DELAY,
        }
    }
}

/// A followed account at or below the repository threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowActivityRecord {
    pub username: String,
    pub repo_count: u64,
}

/// What happened when one login was looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The lookup succeeded.
    Checked { repo_count: u64, qualifies: bool },
    /// The lookup failed and the login was left out.
    Skipped { reason: String },
}

/// Progress report handed to the caller after each lookup.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// 1-based position of this login in the batch.
    pub index: usize,
    pub total: usize,
    pub login: &'a str,
    pub outcome: &'a CheckOutcome,
}

/// Fetches the accounts `identity` follows, in discovery order and raw case.
///
/// # Errors
/// Returns `CoreError::Fetch` if any page of the listing fails.
#[instrument(skip(directory), fields(identity = %identity))]
pub async fn fetch_following_logins(
    directory: &dyn UserDirectory,
    identity: &Identity,
) -> Result<Vec<String>, CoreError> {
    directory
        .list_following(identity.as_str(), LoginCase::Preserve)
        .await
        .map_err(|source| {
            error!(error = %source, "Failed to retrieve following");
            CoreError::Fetch {
                list: ListKind::Following,
                source,
            }
        })
}

/// Looks up every login and keeps the ones at or below `settings.threshold`.
///
/// The returned records keep the order of `logins`. `on_progress` is called
/// once per login, after its lookup.
pub async fn enrich<F>(
    directory: &dyn UserDirectory,
    logins: &[String],
    settings: EnrichSettings,
    mut on_progress: F,
) -> Vec<LowActivityRecord>
where
    F: FnMut(Progress<'_>),
{
    let total = logins.len();
    let mut records = Vec::new();

    info!(
        total,
        threshold = settings.threshold,
        delay_ms = settings.delay.as_millis() as u64,
        "Checking repository counts"
    );

    for (position, login) in logins.iter().enumerate() {
        let outcome = match check_user(directory, login, settings.threshold).await {
            Ok(repo_count) => {
                let qualifies = repo_count <= settings.threshold;
                if qualifies {
                    records.push(LowActivityRecord {
                        username: login.clone(),
                        repo_count,
                    });
                }
                CheckOutcome::Checked {
                    repo_count,
                    qualifies,
                }
            }
            Err(e) => {
                warn!(login = %login, error = %e, "Skipping user");
                CheckOutcome::Skipped {
                    reason: e.to_string(),
                }
            }
        };

        on_progress(Progress {
            index: position + 1,
            total,
            login,
            outcome: &outcome,
        });

        if position + 1 < total && !settings.delay.is_zero() {
            tokio::time::sleep(settings.delay).await;
        }
    }

    info!(found = records.len(), "Finished checking repository counts");
    records
}

async fn check_user(
    directory: &dyn UserDirectory,
    login: &str,
    threshold: u64,
) -> Result<u64, github_client::Error> {
    let details = directory.get_user_details(login).await?;
    let repo_count = details.repo_count()?;
    debug!(login, repo_count, threshold, "Checked user");
    Ok(repo_count)
}
