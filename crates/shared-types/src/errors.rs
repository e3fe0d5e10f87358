//! # Error Types
//!
//! The single error taxonomy returned by every core operation.
//!
//! | Variant | Meaning | External mapping |
//! |---------|---------|------------------|
//! | `Validation` | malformed, missing, or out-of-enum input | 400 |
//! | `NotFound` | referenced record/entity/donor/incident absent | 404 |
//! | `InvalidStateTransition` | action attempted on a record in the wrong state | 409 |
//! | `StateConflict` | lost an optimistic race on the same record | 409 |
//! | `Permission` | role-gated action without authorization | 403 |
//! | `Internal` | store/transaction failure (details are logged, never returned) | 500 |

use thiserror::Error;

use crate::entities::RecordStatus;

/// Errors returned by core operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Input failed validation.
    #[error("Validation failed for '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Referenced resource does not exist.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Action is not legal from the record's current status.
    #[error("Cannot {action} record {id} in status {from}")]
    InvalidStateTransition {
        id: String,
        from: RecordStatus,
        action: &'static str,
    },

    /// A concurrent transition committed first.
    #[error("Record {id} was modified concurrently")]
    StateConflict { id: String },

    /// Actor is not allowed to perform the action.
    #[error("Actor {actor} is not permitted to {action}")]
    Permission { actor: String, action: &'static str },

    /// Infrastructure failure. The message is generic by construction.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CoreError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CoreError::Internal {
            message: message.into(),
        }
    }

    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::Validation { .. } => "VALIDATION_ERROR",
            CoreError::NotFound { .. } => "NOT_FOUND",
            CoreError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            CoreError::StateConflict { .. } => "STATE_CONFLICT",
            CoreError::Permission { .. } => "PERMISSION_DENIED",
            CoreError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Status code the HTTP boundary maps this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            CoreError::Validation { .. } => 400,
            CoreError::NotFound { .. } => 404,
            CoreError::InvalidStateTransition { .. } | CoreError::StateConflict { .. } => 409,
            CoreError::Permission { .. } => 403,
            CoreError::Internal { .. } => 500,
        }
    }

    /// Expected outcomes are returned to callers; only `Internal` is a fault.
    pub fn is_expected(&self) -> bool {
        !matches!(self, CoreError::Internal { .. })
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_mapping() {
        assert_eq!(CoreError::validation("notes", "required").http_status(), 400);
        assert_eq!(CoreError::not_found("record", "r-1").http_status(), 404);
        assert_eq!(
            CoreError::StateConflict { id: "r-1".into() }.http_status(),
            409
        );
        assert_eq!(
            CoreError::InvalidStateTransition {
                id: "r-1".into(),
                from: RecordStatus::Verified,
                action: "verify",
            }
            .http_status(),
            409
        );
        assert_eq!(CoreError::internal("store unavailable").http_status(), 500);
    }

    #[test]
    fn test_display_mentions_state() {
        let err = CoreError::InvalidStateTransition {
            id: "r-9".into(),
            from: RecordStatus::Rejected,
            action: "verify",
        };
        assert_eq!(err.to_string(), "Cannot verify record r-9 in status REJECTED");
        assert_eq!(err.code(), "INVALID_STATE_TRANSITION");
        assert!(err.is_expected());
        assert!(!CoreError::internal("x").is_expected());
    }
}
