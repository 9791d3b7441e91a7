//! Error taxonomy for a sync run.

use crate::backend::BackendError;

/// Failures a sync run can hit.
///
/// Only a failure to open the cache is fatal; everything else is logged where
/// it happens and the entity keeps its previous sync status.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Reading from either remote service failed
    #[error("Remote fetch failed: {0}")]
    RemoteFetch(#[source] BackendError),

    /// Creating, updating or closing something remotely failed
    #[error("Remote mutation failed: {0}")]
    RemoteMutation(#[source] BackendError),

    /// The local cache rejected a read or write
    #[error("Local store error: {0}")]
    LocalStore(#[from] sea_orm::DbErr),

    /// Remote or cached data is missing a field the operation needs
    #[error("Data mapping error: {0}")]
    DataMapping(String),
}

pub type SyncResult<T> = Result<T, SyncError>;
