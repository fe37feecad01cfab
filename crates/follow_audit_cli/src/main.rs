use clap::{Parser, Subcommand};
use follow_audit_cli::{
    commands::{
        compare_cmd::{self, CompareArgs},
        low_repos_cmd::{self, LowReposArgs},
    },
    config::{build_run_config, credential_from_env, AppConfig, Overrides},
    errors::Error,
};
use follow_audit_core::RunConfig;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// follow-audit: inspect who you follow on GitHub and who follows you
#[derive(Parser)]
#[command(name = "follow-audit")]
#[command(about = "Compare GitHub followers with following and find low-activity accounts", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (default: ./follow-audit.toml if present)
    #[arg(long, global = true)]
    config: Option<String>,

    /// GitHub username to audit (overrides github.username from the configuration file)
    #[arg(long, global = true)]
    username: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List users who do not follow you back, and users you do not follow back
    Compare(CompareArgs),

    /// List users you follow who have few public repositories
    LowRepos(LowReposArgs),

    /// Show the CLI version
    Version,
}

fn resolve_run_config(
    cli: &Cli,
    threshold: Option<u64>,
    delay_ms: Option<u64>,
) -> Result<RunConfig, Error> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?;
    let overrides = Overrides {
        username: cli.username.clone(),
        threshold,
        delay_ms,
    };
    let credential = credential_from_env()?;
    build_run_config(&config, &overrides, credential)
}

async fn run(cli: &Cli) -> Result<(), Error> {
    match &cli.command {
        Commands::Compare(args) => {
            let run_config = resolve_run_config(cli, None, None)?;
            compare_cmd::execute(&run_config, args).await
        }
        Commands::LowRepos(args) => {
            let run_config = resolve_run_config(cli, args.threshold, args.delay_ms)?;
            low_repos_cmd::execute(&run_config, args).await
        }
        Commands::Version => {
            // Print version info from baked-in value
            println!(
                "follow-audit version {}",
                option_env!("FOLLOW_AUDIT_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("FOLLOW_AUDIT_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli).await {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
