//! Audit sink errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    #[error("Audit sink unavailable: {reason}")]
    Unavailable { reason: String },
}
