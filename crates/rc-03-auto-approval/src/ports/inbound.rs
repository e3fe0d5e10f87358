//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use shared_types::{Actor, CoreResult, EntityId, RecordId, SubmittedRecord};

use crate::domain::{ConfigureAutoApproval, RuleDecision};

/// Why a record stayed in the manual queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueReason {
    /// A rule condition did not hold.
    Rule(RuleDecision),
    /// Another transition committed before the auto-verify.
    Superseded,
    /// The record or entity could not be read.
    Unavailable,
}

impl QueueReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueReason::Rule(decision) => decision.as_str(),
            QueueReason::Superseded => "superseded",
            QueueReason::Unavailable => "unavailable",
        }
    }
}

/// Result of running a fresh submission through the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum AutoApprovalOutcome {
    AutoVerified(SubmittedRecord),
    Queued(QueueReason),
}

impl AutoApprovalOutcome {
    pub fn is_auto_verified(&self) -> bool {
        matches!(self, AutoApprovalOutcome::AutoVerified(_))
    }

    /// Metrics label.
    pub fn label(&self) -> &'static str {
        match self {
            AutoApprovalOutcome::AutoVerified(_) => "auto_verified",
            AutoApprovalOutcome::Queued(reason) => reason.as_str(),
        }
    }
}

/// Primary Auto-Approval API
#[async_trait]
pub trait AutoApprovalApi: Send + Sync {
    /// Evaluate a just-submitted record and auto-verify it on a match.
    ///
    /// Never fails because of the rule itself. Only an absent record is an
    /// error; every other problem leaves the record queued.
    async fn evaluate_submission(&self, record_id: &RecordId) -> CoreResult<AutoApprovalOutcome>;

    /// Write one rule to every listed entity, all or nothing.
    async fn configure(
        &self,
        request: ConfigureAutoApproval,
        actor: &Actor,
    ) -> CoreResult<Vec<EntityId>>;
}
