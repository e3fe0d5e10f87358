//! # Verification State Machine
//!
//! **Component:** Verification State Machine
//!
//! ## Purpose
//!
//! Owns the record lifecycle. Every status change goes through this crate,
//! and every change is a compare-and-set against the record store so two
//! racing decisions on one record can never both commit.
//!
//! ## Lifecycle
//!
//! ```text
//! DRAFT ──→ SUBMITTED ──┬──→ VERIFIED
//!                       ├──→ AUTO_VERIFIED
//!                       └──→ REJECTED
//! ```
//!
//! All right-hand states are terminal.
//!
//! ## Contract
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Forward-only transitions | `domain/transition.rs` - `Transition::check` |
//! | One winner per record | `service.rs` - conditional update, zero rows → `StateConflict` |
//! | Notes required, ≤ 10,000 chars | `domain/notes.rs` |
//! | Closed rejection reasons | `RejectionReason::from_str` |
//! | One audit entry per transition | `service.rs` - `record_audit` |
//! | Audit failure never undoes a transition | `service.rs` - logged, not propagated |
//!
//! ## Transition Flow
//!
//! ```text
//! authorize → validate input → read record ─┬─ absent        → NotFound
//!                                           ├─ wrong status  → InvalidStateTransition
//!                                           └─ SUBMITTED → CAS ─┬─ 1 row  → audit, Ok
//!                                                                └─ 0 rows → StateConflict
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryAuditLog;
pub use domain::{AuditError, RuleMatch, SubmissionLimits, Transition, MAX_REVIEW_NOTES_CHARS};
pub use ports::inbound::{SubmissionReceipt, VerificationApi};
pub use ports::outbound::AuditSink;
pub use service::{VerificationConfig, VerificationService};
