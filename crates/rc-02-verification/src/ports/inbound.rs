//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Actor, CoreResult, NewRecord, RecordId, RecordStatus, SubmittedRecord};

use crate::domain::RuleMatch;

/// Returned from `submit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: RecordId,
    pub status: RecordStatus,
}

/// Primary Verification API
///
/// Every transition reads the record, checks the precondition, then issues a
/// single conditional write. Losing a race to another transition on the same
/// record returns `CoreError::StateConflict`.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    /// Create a record as SUBMITTED, or DRAFT when `as_draft` is set.
    async fn submit(&self, record: NewRecord, actor: &Actor) -> CoreResult<SubmissionReceipt>;

    /// DRAFT → SUBMITTED.
    async fn submit_draft(&self, id: &RecordId, actor: &Actor) -> CoreResult<SubmittedRecord>;

    /// SUBMITTED → VERIFIED.
    ///
    /// # Errors
    /// * `Permission` - actor is not a coordinator or admin
    /// * `Validation` - notes blank or longer than the configured limit
    /// * `NotFound` - no such record
    /// * `InvalidStateTransition` - record is not SUBMITTED
    /// * `StateConflict` - another transition committed first
    async fn verify(
        &self,
        id: &RecordId,
        actor: &Actor,
        notes: &str,
    ) -> CoreResult<SubmittedRecord>;

    /// SUBMITTED → REJECTED. `reason` is the wire name of a `RejectionReason`.
    ///
    /// Same error set as `verify`; an unknown reason is a `Validation` error.
    async fn reject(
        &self,
        id: &RecordId,
        actor: &Actor,
        reason: &str,
        notes: &str,
    ) -> CoreResult<SubmittedRecord>;

    /// SUBMITTED → AUTO_VERIFIED. Called by the auto-approval engine only.
    async fn auto_verify(&self, id: &RecordId, rule: &RuleMatch) -> CoreResult<SubmittedRecord>;

    async fn get_record(&self, id: &RecordId) -> CoreResult<SubmittedRecord>;
}
