use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use outage_api::OutageApiClient;
use outage_sync::config::AppConfig;
use outage_sync::domain::service::SyncService;
use outage_sync::logging;

/// Synchronizes site-relevant outages with the outage service.
#[derive(Parser)]
#[command(name = "outage-sync")]
#[command(about = "Fetches outages, filters them to one site's devices, and submits the result")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print effective configuration (JSON, secrets redacted) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the synchronization pipeline once (default)
    Run {
        /// Fetch and filter, but skip the final submission
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !path.is_file() {
            anyhow::bail!("config file does not exist: {}", path.display());
        }
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init(&config.logging, cli.verbose);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_redacted_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run { dry_run: false }) {
        Commands::Run { dry_run } => run_sync(config, dry_run).await,
        Commands::Check => check_config(&config),
    }
}

async fn run_sync(config: AppConfig, dry_run: bool) -> Result<()> {
    tracing::info!(site_id = %config.sync.site_id, dry_run, "outage sync starting");

    let client = OutageApiClient::new(config.api)?;
    let service = SyncService::new(client, config.sync);

    match service.run(dry_run).await {
        Ok(outcome) => {
            tracing::info!(
                total = outcome.total_outages,
                relevant = outcome.relevant_outages,
                submitted = outcome.submitted,
                "outage sync finished"
            );
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "outage sync failed");
            Err(err.into())
        }
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    println!("Configuration is valid");
    println!("{}", config.to_redacted_json()?);
    Ok(())
}
