//! Command modules for the follow-audit CLI.
//!
//! - `compare_cmd`: followers versus following
//! - `low_repos_cmd`: followed accounts with few public repositories

use std::path::PathBuf;

use clap::Args;
use follow_audit_core::OutputFormat;

pub mod compare_cmd;
pub mod low_repos_cmd;

/// Output options shared by both commands.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// File to write the results to. Results are only printed when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Format of the output file (txt or csv).
    #[arg(long, default_value_t = OutputFormat::Txt)]
    pub format: OutputFormat,
}
