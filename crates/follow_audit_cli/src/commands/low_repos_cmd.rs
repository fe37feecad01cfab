//! `follow-audit low-repos`: followed accounts with few public repositories.

use clap::Args;
use colored::Colorize;
use follow_audit_core::{
    enrich, export_low_activity, fetch_following_logins, CheckOutcome, LowActivityRecord,
    Progress, RunConfig,
};
use github_client::UserDirectory;
use tracing::{info, instrument};

use crate::{commands::OutputArgs, errors::Error};

#[cfg(test)]
#[path = "low_repos_cmd_tests.rs"]
mod tests;

/// Command-line arguments for the low-repos command.
#[derive(Args, Debug, Clone, Default)]
pub struct LowReposArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Report users with at most this many public repositories.
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Pause between user lookups, in milliseconds.
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Runs the low-activity check against GitHub.
pub async fn execute(run_config: &RunConfig, args: &LowReposArgs) -> Result<(), Error> {
    let client = run_config.build_client().map_err(Error::Client)?;
    run_low_repos(&client, run_config, args).await.map(|_| ())
}

/// Fetches the following list, checks every account and reports the results.
///
/// The threshold and delay come from `run_config.enrichment`; the flags in
/// `args` have already been folded in when the run configuration was built.
#[instrument(skip(directory, run_config), fields(identity = %run_config.identity))]
pub async fn run_low_repos(
    directory: &dyn UserDirectory,
    run_config: &RunConfig,
    args: &LowReposArgs,
) -> Result<Vec<LowActivityRecord>, Error> {
    let settings = run_config.enrichment;

    println!(
        "Fetching the list of users followed by '{}'...",
        run_config.identity
    );
    let logins = fetch_following_logins(directory, &run_config.identity).await?;

    println!("\nChecking {} users...", logins.len());
    let records = enrich(directory, &logins, settings, |progress| {
        println!("{}", format_progress(&progress))
    })
    .await;

    print!("{}", format_low_repos_report(&records, settings.threshold));

    if let Some(path) = &args.output.output {
        export_low_activity(&records, settings.threshold, path, args.output.format)?;
        info!(path = %path.display(), "Low-activity users exported");
        println!(
            "\nResults exported to '{}' in {} format.",
            path.display(),
            args.output.format.to_string().to_uppercase()
        );
    }

    Ok(records)
}

/// One console line per checked user.
pub fn format_progress(progress: &Progress<'_>) -> String {
    match progress.outcome {
        CheckOutcome::Checked { repo_count, .. } => format!(
            "Checking {}/{}: user '{}' has {} repositories.",
            progress.index, progress.total, progress.login, repo_count
        ),
        CheckOutcome::Skipped { reason } => format!(
            "Checking {}/{}: skipping user '{}' ({})",
            progress.index,
            progress.total,
            progress.login,
            reason.red()
        ),
    }
}

/// Formats the console summary, sorted by username.
pub fn format_low_repos_report(records: &[LowActivityRecord], threshold: u64) -> String {
    let mut sorted: Vec<&LowActivityRecord> = records.iter().collect();
    sorted.sort_by(|a, b| a.username.cmp(&b.username));

    let mut output = format!("\n{}\n", "--- Results ---".bold());
    if sorted.is_empty() {
        output.push_str(&format!(
            "{}\n",
            format!("Every user you follow has more than {threshold} repositories.").green()
        ));
        return output;
    }

    output.push_str(&format!(
        "Found {} users you follow with {} or fewer repositories:\n",
        sorted.len(),
        threshold
    ));
    for record in sorted {
        output.push_str(&format!(
            "- {} ({} repositories)\n",
            record.username, record.repo_count
        ));
    }
    output
}
