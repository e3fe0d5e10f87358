//! # Domain Errors
//!
//! Error types for the Record Store.
//!
//! Store errors carry storage detail for operators. They are converted into a
//! generic `CoreError::Internal` at the port boundary so that detail is logged
//! and never returned to callers.

use shared_types::{CoreError, DonorId, EntityId, RecordId};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Backend unreachable or transaction aborted.
    #[error("Store unavailable: {reason}")]
    Unavailable { reason: String },

    /// A record with this id already exists.
    #[error("Duplicate record id: {id}")]
    DuplicateRecord { id: RecordId },

    /// Batch write referenced an entity that does not exist.
    #[error("Unknown entity: {id}")]
    UnknownEntity { id: EntityId },

    /// Batch write referenced a donor that does not exist.
    #[error("Unknown donor: {id}")]
    UnknownDonor { id: DonorId },
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        tracing::error!(error = %err, "Record store operation failed");
        CoreError::internal("record store operation failed")
    }
}
