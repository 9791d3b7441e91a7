use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use todoist_miro_sync::backend::miro::MiroClient;
use todoist_miro_sync::backend::todoist::TodoistClient;
use todoist_miro_sync::config::{Config, Credentials};
use todoist_miro_sync::logger;
use todoist_miro_sync::storage::LocalStorage;
use todoist_miro_sync::sync::SyncService;
use todoist_miro_sync::utils::color::ColorAssigner;

/// Mirror a Todoist project onto a Miro board.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file to use instead of the default lookup
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a default config file (to the XDG location unless a path is given) and exit
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    generate_config: Option<Option<PathBuf>>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(target) = cli.generate_config {
        let path = match target {
            Some(path) => path,
            None => Config::get_default_config_path()?,
        };
        return Config::generate_default_config(path);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    logger::init(&config.logging, cli.verbose)?;

    if dotenv::dotenv().is_err() {
        info!("No .env file found, using the process environment");
    }
    let credentials = Credentials::from_env(&config)?;

    let colors = match &config.colors.overrides_file {
        Some(path) => ColorAssigner::from_file(path)?,
        None => ColorAssigner::default(),
    };
    if !colors.overrides().is_empty() {
        info!("🎨 Loaded {} color overrides", colors.overrides().len());
    }

    let storage = LocalStorage::open(&config.storage.database_path)
        .await
        .with_context(|| format!("Failed to open cache {}", config.storage.database_path.display()))?;

    let task_source = Arc::new(TodoistClient::with_base_url(
        &config.todoist.base_url,
        credentials.todoist_api_token.clone(),
    ));
    let board = Arc::new(MiroClient::with_base_url(
        &config.miro.base_url,
        credentials.miro_access_token.clone(),
    ));

    let service = SyncService::new(storage, task_source, board, colors, config.sync_settings(&credentials));
    let report = service.run().await;
    if report.errors > 0 {
        warn!("⚠️  {} errors were absorbed; the next run will retry what did not converge", report.errors);
    }

    service.into_storage().close().await?;
    Ok(())
}
