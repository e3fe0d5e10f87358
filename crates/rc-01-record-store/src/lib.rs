//! # Record Store
//!
//! **Component:** Record Store (external collaborator boundary)
//!
//! ## Purpose
//!
//! Defines the driven ports every other component reads and writes through,
//! and ships an in-memory adapter honouring the same contract.
//!
//! ## Contract
//!
//! | Guarantee | Enforcement Location |
//! |-----------|---------------------|
//! | Status writes are compare-and-set | `RecordStore::conditional_update` |
//! | At most one concurrent CAS on a row applies | `adapters/memory.rs` - write lock spans read-compare-write |
//! | Auto-approval config writes are all-or-nothing | `EntityStore::set_auto_approval` |
//! | Donor standings persist in one batch | `DonorLedger::apply_standings` |
//!
//! ## Conditional Update
//!
//! ```text
//! UPDATE records SET status = X, ... WHERE id = :id AND status = :expected
//!
//!   1 row  → Ok(Some(updated))
//!   0 rows → Ok(None)   (absent, or someone else moved it first)
//! ```
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/memory.rs - InMemoryReliefStore                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs - RecordStore, EntityStore, DonorLedger,     │
//! │                      IncidentRegistry                            │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/filter.rs  - RecordFilter                               │
//! │  domain/update.rs  - StatusUpdate (what a transition writes)    │
//! │  domain/errors.rs  - StoreError                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryReliefStore;
pub use domain::{RecordFilter, StatusUpdate, StoreError};
pub use ports::outbound::{DonorLedger, EntityStore, IncidentRegistry, RecordStore};
