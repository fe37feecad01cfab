//! `follow-audit compare`: who does not follow back, and who is not followed back.

use clap::Args;
use colored::Colorize;
use follow_audit_core::{export_relationships, fetch_relationships, Relationships, RunConfig};
use github_client::UserDirectory;
use tracing::{info, instrument};

use crate::{commands::OutputArgs, errors::Error};

#[cfg(test)]
#[path = "compare_cmd_tests.rs"]
mod tests;

/// Command-line arguments for the compare command.
#[derive(Args, Debug, Clone, Default)]
pub struct CompareArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Runs the comparison against GitHub.
pub async fn execute(run_config: &RunConfig, args: &CompareArgs) -> Result<(), Error> {
    let client = run_config.build_client().map_err(Error::Client)?;
    run_compare(&client, run_config, args).await.map(|_| ())
}

/// Fetches both listings, prints the report and writes the output file.
///
/// Nothing is written when either listing fails.
#[instrument(skip(directory, run_config), fields(identity = %run_config.identity))]
pub async fn run_compare(
    directory: &dyn UserDirectory,
    run_config: &RunConfig,
    args: &CompareArgs,
) -> Result<Relationships, Error> {
    println!(
        "Fetching followers and following for user '{}'...",
        run_config.identity
    );

    let relationships = fetch_relationships(directory, &run_config.identity).await?;

    print!("{}", format_compare_report(&relationships));

    if let Some(path) = &args.output.output {
        export_relationships(&relationships, path, args.output.format)?;
        info!(path = %path.display(), "Comparison exported");
        println!(
            "\nResults exported to '{}' in {} format.",
            path.display(),
            args.output.format.to_string().to_uppercase()
        );
    }

    Ok(relationships)
}

/// Formats the console report for a comparison.
pub fn format_compare_report(relationships: &Relationships) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", "--- Comparison Results ---".bold()));
    output.push_str(&format!(
        "\nTotal Followers: {}\n",
        relationships.followers_total
    ));
    output.push_str(&format!(
        "Total Following: {}\n",
        relationships.following_total
    ));

    if relationships.non_followers.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            "Great news! Everyone you follow on GitHub also follows you back.".green()
        ));
    } else {
        output.push_str(&format!(
            "\n{} ({}):\n",
            "Users you follow who DO NOT follow you back".yellow(),
            relationships.non_followers.len()
        ));
        for login in &relationships.non_followers {
            output.push_str(&format!("- {login}\n"));
        }
    }

    if relationships.fans.is_empty() {
        output.push_str(&format!(
            "\n{}\n",
            "Great news! You follow back all of your GitHub fans.".green()
        ));
    } else {
        output.push_str(&format!(
            "\n{} ({}):\n",
            "Users who FOLLOW YOU but you DO NOT follow back".yellow(),
            relationships.fans.len()
        ));
        for login in &relationships.fans {
            output.push_str(&format!("- {login}\n"));
        }
    }

    output.push_str(&format!("\n{}\n", "--- Done ---".bold()));
    output
}
