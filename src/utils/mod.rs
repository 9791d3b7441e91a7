//! Utility modules shared by the storage layer and the sync engine.
//!
//! - [`color`] - Collaborator color derivation and board tag color names
//! - [`datetime`] - Due date conversion for board cards
//! - [`names`] - Display-name helpers

pub mod color;
pub mod datetime;
pub mod names;
