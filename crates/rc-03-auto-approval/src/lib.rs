//! # Auto-Approval Rule Engine
//!
//! **Component:** Auto-Approval Rule Engine
//!
//! ## Purpose
//!
//! Each entity may own one auto-approval rule. When a record is submitted the
//! engine evaluates it against its entity's rule and, on a match, asks the
//! state machine to move it to AUTO_VERIFIED. Evaluation runs inline in the
//! submission pipeline, never as a background sweep.
//!
//! ## Fail-Safe Configuration
//!
//! | Stored document | Decoded as |
//! |-----------------|------------|
//! | `autoApproval` with `schemaVersion: 1` | typed `AutoApprovalConfig` |
//! | missing section | `None` → disabled |
//! | any other path (`metadata.autoApproval`, `auto_approval`) | `None` → disabled |
//! | malformed or unknown version | `None` → disabled |
//!
//! A bad rule can only ever leave a record in the manual queue.
//!
//! ## Module Structure
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  service.rs - AutoApprovalEngine                                │
//! │    evaluate_submission → evaluate → AutoVerifier::auto_verify   │
//! │    configure → validate → EntityStore::set_auto_approval        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↓ uses ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/rule.rs   - evaluate, matches, RuleDecision             │
//! │  domain/config.rs - decode_config, ConfigureAutoApproval        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    decode_config, decode_entity, evaluate, matches, ApprovalConditions, ConfigureAutoApproval,
    RuleDecision,
};
pub use ports::inbound::{AutoApprovalApi, AutoApprovalOutcome, QueueReason};
pub use ports::outbound::AutoVerifier;
pub use service::AutoApprovalEngine;
