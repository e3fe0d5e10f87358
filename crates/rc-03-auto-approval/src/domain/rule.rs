//! The auto-approval predicate.
//!
//! Conditions are checked in a fixed order and the first failure is reported:
//!
//! | # | Condition | Failure |
//! |---|-----------|---------|
//! | 0 | entity has a decodable config | `NoConfig` |
//! | 1 | `enabled` | `Disabled` |
//! | 2 | record kind within `scope` | `OutOfScope` |
//! | 3 | record type in `typesAllowed` (if set) | `TypeNotAllowed` |
//! | 4 | priority ≤ `maxPriority` (if set) | `PriorityTooHigh` |
//! | 5 | notes or media present (if required) | `MissingDocumentation` |
//! | 6 | record is SUBMITTED | `NotSubmitted` |

use serde::{Deserialize, Serialize};
use shared_types::{AutoApprovalConfig, RecordStatus, SubmittedRecord};

/// Result of evaluating one record against one entity's rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleDecision {
    Match,
    NoConfig,
    Disabled,
    OutOfScope,
    TypeNotAllowed,
    PriorityTooHigh,
    MissingDocumentation,
    NotSubmitted,
}

impl RuleDecision {
    pub fn is_match(&self) -> bool {
        matches!(self, RuleDecision::Match)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleDecision::Match => "match",
            RuleDecision::NoConfig => "no_config",
            RuleDecision::Disabled => "disabled",
            RuleDecision::OutOfScope => "out_of_scope",
            RuleDecision::TypeNotAllowed => "type_not_allowed",
            RuleDecision::PriorityTooHigh => "priority_too_high",
            RuleDecision::MissingDocumentation => "missing_documentation",
            RuleDecision::NotSubmitted => "not_submitted",
        }
    }
}

/// Evaluate `record` against an entity's config. A missing config never matches.
pub fn evaluate(record: &SubmittedRecord, config: Option<&AutoApprovalConfig>) -> RuleDecision {
    let Some(config) = config else {
        return RuleDecision::NoConfig;
    };
    if !config.enabled {
        return RuleDecision::Disabled;
    }
    if !config.scope.covers(record.kind) {
        return RuleDecision::OutOfScope;
    }
    if let Some(types) = &config.types_allowed {
        if !types.contains(&record.record_type) {
            return RuleDecision::TypeNotAllowed;
        }
    }
    if config.max_priority.is_some_and(|max| record.priority > max) {
        return RuleDecision::PriorityTooHigh;
    }
    if config.requires_documentation && !record.payload.has_documentation() {
        return RuleDecision::MissingDocumentation;
    }
    if record.status != RecordStatus::Submitted {
        return RuleDecision::NotSubmitted;
    }
    RuleDecision::Match
}

/// True when every condition of `config` holds for `record`.
pub fn matches(record: &SubmittedRecord, config: &AutoApprovalConfig) -> bool {
    evaluate(record, Some(config)).is_match()
}
