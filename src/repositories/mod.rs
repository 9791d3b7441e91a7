//! Repository layer for database operations.
//!
//! Repositories encapsulate the queries against each table and work on any
//! SeaORM connection, so the same calls run inside or outside a transaction.

pub mod collaborator;
pub mod task;

pub use collaborator::CollaboratorRepository;
pub use task::TaskRepository;
