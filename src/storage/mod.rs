//! Local cache of remote task and collaborator state.
//!
//! This module provides SeaORM-backed operations for:
//! - Collaborators and their display colors
//! - Tasks and their board sync status
//! - Additive schema migrations

pub mod collaborators;
pub mod db;
pub mod tasks;

pub use db::LocalStorage;
pub use tasks::{BoardSnapshot, TaskUpdate};
