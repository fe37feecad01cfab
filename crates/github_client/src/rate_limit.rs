//! Rate limit information carried by GitHub responses.
//!
//! GitHub reports quota through `X-RateLimit-*` headers on every response. The
//! client only reads them when a request is refused with 403 so the operator can
//! see when the quota resets.

use std::fmt;

use chrono::{DateTime, Utc};
use http::HeaderMap;

#[cfg(test)]
#[path = "rate_limit_tests.rs"]
mod tests;

pub const RATE_LIMIT_LIMIT_HEADER: &str = "x-ratelimit-limit";
pub const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// Parsed rate limit headers.
///
/// Every field is optional because a 403 can also be a plain permission
/// failure, in which case GitHub may omit some or all of the headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    pub limit: Option<u64>,

    /// Requests remaining in the current window.
    pub remaining: Option<u64>,

    /// Unix timestamp (seconds) at which the window resets.
    pub reset_at: Option<u64>,
}

impl RateLimitInfo {
    /// Reads the `X-RateLimit-*` headers from a response.
    ///
    /// Headers that are missing or not valid integers are left as `None`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: parse_header_u64(headers, RATE_LIMIT_LIMIT_HEADER),
            remaining: parse_header_u64(headers, RATE_LIMIT_REMAINING_HEADER),
            reset_at: parse_header_u64(headers, RATE_LIMIT_RESET_HEADER),
        }
    }

    /// The reset instant as a UTC timestamp.
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        let reset = i64::try_from(self.reset_at?).ok()?;
        DateTime::from_timestamp(reset, 0)
    }

    /// Whether the headers say the quota is used up.
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

impl fmt::Display for RateLimitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.remaining {
            Some(remaining) => write!(f, "remaining {remaining}")?,
            None => write!(f, "remaining unknown")?,
        }
        if let Some(limit) = self.limit {
            write!(f, " of {limit}")?;
        }
        write!(f, " requests")?;

        match (self.reset_time(), self.reset_at) {
            (Some(time), _) => write!(f, ", resets at {}", time.format("%Y-%m-%d %H:%M:%S UTC")),
            (None, Some(raw)) => write!(f, ", resets at epoch {raw}"),
            (None, None) => Ok(()),
        }
    }
}

fn parse_header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}
