//! Follower / following comparison.
//!
//! Both listings are reduced to sets of lower-cased logins so that `Alice` and
//! `alice` are the same account. The sets are ordered, which gives the
//! exporter its lexicographic order without a separate sort.

use std::collections::BTreeSet;

use github_client::{LoginCase, UserDirectory};
use tracing::{error, info, instrument};

use crate::{
    errors::{CoreError, ListKind},
    identity::Identity,
};

#[cfg(test)]
#[path = "comparator_tests.rs"]
mod tests;

/// A set of normalised (lower-cased) logins.
pub type UserSet = BTreeSet<String>;

/// Builds a [`UserSet`], lower-casing every login.
pub fn user_set<I, S>(logins: I) -> UserSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    logins
        .into_iter()
        .map(|login| login.as_ref().to_lowercase())
        .collect()
}

/// The outcome of comparing followers with following.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Relationships {
    /// Number of distinct followers.
    pub followers_total: usize,
    /// Number of distinct accounts followed.
    pub following_total: usize,
    /// Accounts followed that do not follow back (`following - followers`).
    pub non_followers: UserSet,
    /// Accounts following that are not followed back (`followers - following`).
    pub fans: UserSet,
}

/// Computes both set differences.
pub fn compare(followers: &UserSet, following: &UserSet) -> Relationships {
    Relationships {
        followers_total: followers.len(),
        following_total: following.len(),
        non_followers: following.difference(followers).cloned().collect(),
        fans: followers.difference(following).cloned().collect(),
    }
}

/// Fetches both listings for `identity` and compares them.
///
/// Followers are fetched first. If either listing fails the whole comparison
/// fails; no partial sets are compared.
///
/// # Errors
/// Returns `CoreError::Fetch` naming the listing that failed.
#[instrument(skip(directory), fields(identity = %identity))]
pub async fn fetch_relationships(
    directory: &dyn UserDirectory,
    identity: &Identity,
) -> Result<Relationships, CoreError> {
    let followers = directory
        .list_followers(identity.as_str(), LoginCase::Lowercase)
        .await
        .map_err(|source| {
            error!(error = %source, "Failed to retrieve followers");
            CoreError::Fetch {
                list: ListKind::Followers,
                source,
            }
        })?;

    let following = directory
        .list_following(identity.as_str(), LoginCase::Lowercase)
        .await
        .map_err(|source| {
            error!(error = %source, "Failed to retrieve following");
            CoreError::Fetch {
                list: ListKind::Following,
                source,
            }
        })?;

    let relationships = compare(&user_set(followers), &user_set(following));

    info!(
        followers = relationships.followers_total,
        following = relationships.following_total,
        non_followers = relationships.non_followers.len(),
        fans = relationships.fans.len(),
        "Compared relationships"
    );

    Ok(relationships)
}
