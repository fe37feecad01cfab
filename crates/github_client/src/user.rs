//! User domain types.
//!
//! These are deliberately partial views of GitHub's user objects: only the
//! fields this client reads are declared, everything else in the payload is
//! ignored during deserialization.

use serde::{Deserialize, Serialize};

use crate::Error;

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;

/// An entry from a follower or following listing.
///
/// # Examples
///
/// ```rust
/// use github_client::UserRecord;
///
/// let user: UserRecord = serde_json::from_str(r#"{"login": "octocat", "id": 1}"#).unwrap();
/// assert_eq!(user.login, "octocat");
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserRecord {
    /// The login name of the user
    pub login: String,
}

/// The subset of `GET /users/{login}` that the client reads.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserDetails {
    /// The login name of the user
    pub login: String,

    /// Number of public repositories. GitHub always sends it, but the field is
    /// optional here so that a truncated payload surfaces as a typed error.
    #[serde(default)]
    pub public_repos: Option<u64>,
}

impl UserDetails {
    /// Returns the public repository count.
    ///
    /// # Errors
    /// Returns `Error::MissingField` when the payload did not include `public_repos`.
    pub fn repo_count(&self) -> Result<u64, Error> {
        self.public_repos.ok_or(Error::MissingField("public_repos"))
    }
}
