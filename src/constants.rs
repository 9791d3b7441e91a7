//! Constants used throughout the application
//!
//! Defaults for configuration values and the names of files the tool reads
//! and writes.

/// Directory name under the XDG config and data directories
pub const APP_DIR_NAME: &str = "todoist-miro-sync";
/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "todoist-miro-sync.toml";
/// Config file name inside the XDG config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "sync.log";

// Environment variables holding credentials
pub const ENV_TODOIST_API_TOKEN: &str = "TODOIST_API_TOKEN";
pub const ENV_TODOIST_PROJECT_ID: &str = "TEAM_PROJECT_ID";
pub const ENV_MIRO_ACCESS_TOKEN: &str = "MIRO_ACCESS_TOKEN";
pub const ENV_MIRO_BOARD_ID: &str = "MIRO_BOARD_ID";

/// Cache file used when none is configured
pub const DEFAULT_DATABASE_PATH: &str = "todoist_tasks.db";

// Board layout defaults
pub const DEFAULT_CARD_WIDTH: u32 = 300;
pub const DEFAULT_CARD_HEIGHT: u32 = 100;
pub const DEFAULT_HORIZONTAL_SPACING: u32 = 10;
pub const DEFAULT_VERTICAL_SPACING: u32 = 1;
pub const DEFAULT_CARDS_PER_COLUMN: u32 = 17;
/// Frame new cards are placed into
pub const DEFAULT_INBOX_FRAME: &str = "Eingang";
/// Frame whose cards mark their tasks as done
pub const DEFAULT_DONE_FRAME: &str = "Done";

pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
