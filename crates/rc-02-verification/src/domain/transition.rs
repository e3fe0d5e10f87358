//! Lifecycle transitions and their preconditions.
//!
//! ```text
//! DRAFT ──submit──→ SUBMITTED ──verify──────→ VERIFIED
//!                       │  └────auto-verify──→ AUTO_VERIFIED
//!                       └───────reject──────→ REJECTED
//! ```

use shared_types::{CoreError, CoreResult, RecordId, RecordStatus};

/// A named edge of the lifecycle graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    SubmitDraft,
    Verify,
    AutoVerify,
    Reject,
}

impl Transition {
    /// Verb used in error messages and logs.
    pub fn action(&self) -> &'static str {
        match self {
            Transition::SubmitDraft => "submit",
            Transition::Verify => "verify",
            Transition::AutoVerify => "auto-verify",
            Transition::Reject => "reject",
        }
    }

    /// Status the record must hold for the transition to apply.
    pub fn from(&self) -> RecordStatus {
        match self {
            Transition::SubmitDraft => RecordStatus::Draft,
            Transition::Verify | Transition::AutoVerify | Transition::Reject => {
                RecordStatus::Submitted
            }
        }
    }

    pub fn to(&self) -> RecordStatus {
        match self {
            Transition::SubmitDraft => RecordStatus::Submitted,
            Transition::Verify => RecordStatus::Verified,
            Transition::AutoVerify => RecordStatus::AutoVerified,
            Transition::Reject => RecordStatus::Rejected,
        }
    }

    /// Check the precondition against the record's current status.
    pub fn check(&self, id: &RecordId, current: RecordStatus) -> CoreResult<()> {
        if current == self.from() && current.can_transition_to(self.to()) {
            Ok(())
        } else {
            Err(CoreError::InvalidStateTransition {
                id: id.to_string(),
                from: current,
                action: self.action(),
            })
        }
    }
}

/// The auto-approval rule that matched a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub rule_id: String,
    pub requires_documentation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [RecordStatus; 5] = [
        RecordStatus::Draft,
        RecordStatus::Submitted,
        RecordStatus::Verified,
        RecordStatus::AutoVerified,
        RecordStatus::Rejected,
    ];

    #[test]
    fn test_terminal_states_admit_nothing() {
        let id = RecordId::new();
        for transition in [
            Transition::SubmitDraft,
            Transition::Verify,
            Transition::AutoVerify,
            Transition::Reject,
        ] {
            for status in ALL_STATUSES.iter().filter(|s| s.is_terminal()) {
                assert!(transition.check(&id, *status).is_err());
            }
        }
    }

    #[test]
    fn test_each_transition_has_exactly_one_source() {
        let id = RecordId::new();
        for transition in [
            Transition::SubmitDraft,
            Transition::Verify,
            Transition::AutoVerify,
            Transition::Reject,
        ] {
            let sources: Vec<_> = ALL_STATUSES
                .iter()
                .filter(|s| transition.check(&id, **s).is_ok())
                .collect();
            assert_eq!(sources, vec![&transition.from()]);
        }
    }

    #[test]
    fn test_error_names_action_and_status() {
        let id = RecordId::new();
        let err = Transition::Reject
            .check(&id, RecordStatus::Verified)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidStateTransition {
                id: id.to_string(),
                from: RecordStatus::Verified,
                action: "reject",
            }
        );
    }
}
