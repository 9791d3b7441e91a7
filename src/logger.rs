//! Logging setup.
//!
//! Everything logs through the `log` macros; this module installs a `fern`
//! dispatcher writing to stderr and, when enabled, to a log file in the data
//! directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};

/// Path of the log file written when file logging is enabled.
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
}

/// Level the dispatcher filters at; `verbose` forces debug.
pub fn effective_level(config: &LoggingConfig, verbose: bool) -> Result<LevelFilter> {
    let configured = config.level_filter()?;
    Ok(if verbose { configured.max(LevelFilter::Debug) } else { configured })
}

/// Build the dispatcher without installing it.
pub fn build_dispatch(config: &LoggingConfig, verbose: bool) -> Result<fern::Dispatch> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(effective_level(config, verbose)?)
        .level_for("sqlx", LevelFilter::Warn)
        .level_for("sea_orm", LevelFilter::Warn)
        .level_for("hyper", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .level_for("rustls", LevelFilter::Warn)
        .chain(std::io::stderr());

    if config.enabled {
        let path = get_log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    Ok(dispatch)
}

/// Install the global logger. Call once at startup.
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    build_dispatch(config, verbose)?
        .apply()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}
