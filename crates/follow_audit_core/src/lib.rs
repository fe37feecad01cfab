//! Core logic for auditing a GitHub account's follow relationships.
//!
//! Two workflows share the fetch layer from `github_client`:
//!
//! * **compare**: fetch followers and following, then report who does not
//!   follow back ([`comparator`]).
//! * **low-repos**: fetch the accounts being followed and look up each one's
//!   public repository count ([`enricher`]).
//!
//! Results of either workflow can be written as text or CSV ([`exporter`]).
//! Configuration is passed in explicitly through [`RunConfig`].

pub mod comparator;
pub use comparator::{compare, fetch_relationships, user_set, Relationships, UserSet};

pub mod enricher;
pub use enricher::{
    enrich, fetch_following_logins, CheckOutcome, EnrichSettings, LowActivityRecord, Progress,
};

pub mod errors;
pub use errors::{CoreError, ExportError, ListKind};

pub mod exporter;
pub use exporter::{
    export_low_activity, export_relationships, render_low_activity, render_relationships,
    OutputFormat,
};

pub mod identity;
pub use identity::Identity;

pub mod run_config;
pub use run_config::RunConfig;

#[cfg(test)]
mod test_support;
