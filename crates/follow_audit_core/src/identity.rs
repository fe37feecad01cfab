//! The GitHub account a run is about.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;

use crate::errors::CoreError;

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

/// GitHub's limit on login length.
pub const MAX_LOGIN_LENGTH: usize = 39;

static LOGIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)*$").expect("login pattern is valid")
});

/// A validated GitHub login.
///
/// Alphanumeric characters separated by single hyphens, at most 39
/// characters, no leading or trailing hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    /// Validates a login.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidIdentity` describing the first rule the value breaks.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let value = value.trim();
        let reject = |reason: &str| CoreError::InvalidIdentity {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        if value.is_empty() {
            return Err(reject("username is empty"));
        }
        if value.len() > MAX_LOGIN_LENGTH {
            return Err(reject("usernames are at most 39 characters"));
        }
        if !LOGIN_PATTERN.is_match(value) {
            return Err(reject(
                "only letters, digits and single hyphens are allowed, and it may not start or end with a hyphen",
            ));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
