//! The field writes a status transition performs.
//!
//! Every adapter applies transitions through `StatusUpdate::apply` so the
//! written fields are identical regardless of backend.

use shared_types::{
    ActorId, RecordStatus, RejectionReason, SubmittedRecord, Timestamp, AUTO_APPROVAL_ACTOR,
};

/// A single status transition's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusUpdate {
    /// DRAFT → SUBMITTED.
    Submit { at: Timestamp },
    /// SUBMITTED → VERIFIED.
    Verify {
        by: ActorId,
        at: Timestamp,
        notes: String,
    },
    /// SUBMITTED → AUTO_VERIFIED.
    AutoVerify { at: Timestamp },
    /// SUBMITTED → REJECTED.
    Reject {
        by: ActorId,
        at: Timestamp,
        reason: RejectionReason,
        notes: String,
    },
}

impl StatusUpdate {
    /// Status the record holds after this update.
    pub fn target(&self) -> RecordStatus {
        match self {
            StatusUpdate::Submit { .. } => RecordStatus::Submitted,
            StatusUpdate::Verify { .. } => RecordStatus::Verified,
            StatusUpdate::AutoVerify { .. } => RecordStatus::AutoVerified,
            StatusUpdate::Reject { .. } => RecordStatus::Rejected,
        }
    }

    /// Write the transition's fields onto `record`.
    pub fn apply(self, record: &mut SubmittedRecord) {
        record.status = self.target();
        match self {
            StatusUpdate::Submit { at } => {
                record.submitted_at = Some(at);
            }
            StatusUpdate::Verify { by, at, notes } => {
                record.verified_by = Some(by);
                record.verified_at = Some(at);
                record.review_notes = Some(notes);
            }
            StatusUpdate::AutoVerify { at } => {
                record.verified_by = Some(ActorId::from(AUTO_APPROVAL_ACTOR));
                record.verified_at = Some(at);
            }
            StatusUpdate::Reject {
                by,
                at,
                reason,
                notes,
            } => {
                record.rejected_by = Some(by);
                record.rejected_at = Some(at);
                record.rejection_reason = Some(reason);
                record.review_notes = Some(notes);
            }
        }
    }
}
