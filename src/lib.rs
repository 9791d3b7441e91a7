//! todoist-miro-sync - mirror a Todoist project onto a Miro board
//!
//! Tasks of one Todoist project become cards on a Miro board, colored by
//! assignee. Remote edits are pushed to the cards, and cards dragged into the
//! board's done frame close their tasks. A local SQLite cache tracks what has
//! been synced so every run only does the remaining work.
//!
//! # Modules
//!
//! * [`config`] - Configuration file and credential handling
//! * [`storage`] - Local cache of tasks and collaborators
//! * [`backend`] - Todoist and Miro adapters
//! * [`sync`] - The reconciliation engine
//! * [`utils`] - Color, date and name helpers

/// Remote service adapters for the task source and the board
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Error taxonomy for sync runs
pub mod error;

/// Logging setup
pub mod logger;

/// Repository layer for database operations
pub mod repositories;

/// Local storage layer caching remote state
pub mod storage;

/// Reconciliation engine keeping the board and the task source converged
pub mod sync;

/// Utility functions for colors, dates and names
pub mod utils;

pub use entities::{collaborator, task};
pub use error::{SyncError, SyncResult};
