//! Configuration management
//!
//! This module handles loading, parsing, and validation of configuration files,
//! and resolving credentials from the environment.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_CARDS_PER_COLUMN, DEFAULT_CARD_HEIGHT,
    DEFAULT_CARD_WIDTH, DEFAULT_DATABASE_PATH, DEFAULT_DONE_FRAME, DEFAULT_HORIZONTAL_SPACING, DEFAULT_INBOX_FRAME,
    DEFAULT_VERTICAL_SPACING, ENV_MIRO_ACCESS_TOKEN, ENV_MIRO_BOARD_ID, ENV_TODOIST_API_TOKEN, ENV_TODOIST_PROJECT_ID,
    LOCAL_CONFIG_FILE,
};
use crate::backend::miro::MIRO_BASE_URL;
use crate::backend::todoist::TODOIST_BASE_URL;
use crate::sync::SyncSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level config file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub todoist: TodoistConfig,
    pub miro: MiroConfig,
    pub layout: LayoutConfig,
    pub storage: StorageConfig,
    pub colors: ColorsConfig,
    pub logging: LoggingConfig,
}

/// Task source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoistConfig {
    /// Environment variable holding the API token
    pub api_token_env: String,
    /// Environment variable holding the project to mirror
    pub project_id_env: String,
    pub base_url: String,
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiroConfig {
    /// Environment variable holding the access token
    pub access_token_env: String,
    /// Environment variable holding the board to draw on
    pub board_id_env: String,
    pub base_url: String,
}

/// Card grid configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub card_width: u32,
    pub card_height: u32,
    pub horizontal_spacing: u32,
    pub vertical_spacing: u32,
    /// Rows per column before the grid wraps to the next column
    pub cards_per_column: u32,
    /// Frame whose top-left corner anchors new cards
    pub inbox_frame: String,
    /// Frame whose cards close their tasks
    pub done_frame: String,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_path: PathBuf,
}

/// Collaborator color configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColorsConfig {
    /// TOML file with an `[overrides]` table of collaborator id -> color
    pub overrides_file: Option<PathBuf>,
}

/// `[logging]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to a file in the data directory
    pub enabled: bool,
    /// One of error, warn, info, debug, trace
    pub level: String,
}

impl Default for TodoistConfig {
    fn default() -> Self {
        Self {
            api_token_env: ENV_TODOIST_API_TOKEN.to_string(),
            project_id_env: ENV_TODOIST_PROJECT_ID.to_string(),
            base_url: TODOIST_BASE_URL.to_string(),
        }
    }
}

impl Default for MiroConfig {
    fn default() -> Self {
        Self {
            access_token_env: ENV_MIRO_ACCESS_TOKEN.to_string(),
            board_id_env: ENV_MIRO_BOARD_ID.to_string(),
            base_url: MIRO_BASE_URL.to_string(),
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: DEFAULT_CARD_WIDTH,
            card_height: DEFAULT_CARD_HEIGHT,
            horizontal_spacing: DEFAULT_HORIZONTAL_SPACING,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            cards_per_column: DEFAULT_CARDS_PER_COLUMN,
            inbox_frame: DEFAULT_INBOX_FRAME.to_string(),
            done_frame: DEFAULT_DONE_FRAME.to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(self.level.trim())
            .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.level))
    }
}

/// Secrets and identifiers read from the environment at startup.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub todoist_api_token: String,
    pub todoist_project_id: String,
    pub miro_access_token: String,
    pub miro_board_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("todoist_project_id", &self.todoist_project_id)
            .field("miro_board_id", &self.miro_board_id)
            .finish_non_exhaustive()
    }
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => anyhow::bail!("environment variable {name} is not set"),
    }
}

impl Credentials {
    /// Read the four values from the variables named in `config`.
    pub fn from_env(config: &Config) -> Result<Self> {
        Ok(Self {
            todoist_api_token: required_env(&config.todoist.api_token_env)?,
            todoist_project_id: required_env(&config.todoist.project_id_env)?,
            miro_access_token: required_env(&config.miro.access_token_env)?,
            miro_board_id: required_env(&config.miro.board_id_env)?,
        })
    }
}

impl Config {
    /// Load the first config file found, falling back to the built-in defaults.
    pub fn load() -> Result<Self> {
        match Self::candidate_paths().into_iter().find(|p| p.exists()) {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate the config file at `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
        let config: Config = toml::from_str(&raw).with_context(|| format!("Invalid TOML in {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Lookup order: working directory, then the XDG config directory.
    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Ok(path) = Self::get_default_config_path() {
            paths.push(path);
        }
        paths
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.card_width == 0 || layout.card_height == 0 {
            anyhow::bail!("card_width and card_height must be greater than zero");
        }
        if layout.cards_per_column == 0 {
            anyhow::bail!("cards_per_column must be greater than zero");
        }
        if layout.inbox_frame.trim().is_empty() || layout.done_frame.trim().is_empty() {
            anyhow::bail!("inbox_frame and done_frame cannot be empty");
        }

        for (key, value) in [
            ("todoist.api_token_env", &self.todoist.api_token_env),
            ("todoist.project_id_env", &self.todoist.project_id_env),
            ("miro.access_token_env", &self.miro.access_token_env),
            ("miro.board_id_env", &self.miro.board_id_env),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("{key} cannot be empty");
            }
        }

        for (key, url) in [("todoist.base_url", &self.todoist.base_url), ("miro.base_url", &self.miro.base_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                anyhow::bail!("{key} must be an http(s) URL, got '{url}'");
            }
        }

        if self.storage.database_path.as_os_str().is_empty() {
            anyhow::bail!("storage.database_path cannot be empty");
        }

        self.logging.level_filter()?;
        Ok(())
    }

    /// Engine settings for the resolved credentials.
    pub fn sync_settings(&self, credentials: &Credentials) -> SyncSettings {
        SyncSettings {
            board_id: credentials.miro_board_id.clone(),
            project_id: credentials.todoist_project_id.clone(),
            layout: self.layout.clone(),
        }
    }

    /// Write the defaults, with a short header, to `path`.
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let body = toml::to_string_pretty(&Self::default()).context("Cannot serialize the default config")?;
        let contents = format!(
            "# todoist-miro-sync configuration\n# Generated on {}\n# Credentials are read from the environment variables named below.\n\n{body}",
            chrono::Local::now().format("%Y-%m-%d")
        );

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).with_context(|| format!("Cannot create {}", dir.display()))?;
        }
        std::fs::write(path, contents).with_context(|| format!("Cannot write {}", path.display()))?;

        println!("{CONFIG_GENERATED}: {}", path.display());
        Ok(())
    }

    /// `<XDG config dir>/todoist-miro-sync`
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or_else(|| anyhow::anyhow!("No config directory on this platform"))
    }

    /// `config.toml` inside [`Self::get_xdg_config_dir`]
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}
