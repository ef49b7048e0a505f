//! relaunch - launch history for package coordinates
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use relaunch::cli::{Cli, Commands};
use relaunch::config::ConfigManager;
use relaunch::error::RelaunchResult;
use relaunch::history::{HistoryStore, StoreOptions};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> RelaunchResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("relaunch=warn"),
        1 => EnvFilter::new("relaunch=info"),
        _ => EnvFilter::new("relaunch=debug"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.general.log_format == "json" {
        subscriber.json().init();
    } else {
        subscriber.without_time().init();
    }

    // Config command doesn't need the history store
    if let Commands::Config(args) = cli.command {
        return relaunch::cli::commands::config(args, &config_manager, &config).await;
    }

    let root = ConfigManager::history_root(cli.root);
    debug!("Using history root {}", root.display());
    let store = HistoryStore::open(&root, StoreOptions::from_config(&config.history));

    // Dispatch to command
    let result = match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::History(args) => relaunch::cli::commands::history(args, &store).await,
        Commands::Record(args) => relaunch::cli::commands::record(args, &store).await,
        Commands::Search(args) => relaunch::cli::commands::search(args, &store).await,
        Commands::Clear(args) => relaunch::cli::commands::clear(args, &store).await,
    };

    // Pending writes must land before the process exits
    let flushed = store.shutdown().await;
    result.and(flushed)
}
