//! # Shared Types Crate
//!
//! This crate contains all domain entities, the `CoreError` taxonomy, the
//! actor/role model, and the `TimeSource` clock abstraction used by every
//! component of the relief verification core.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-component types are defined here.
//! - **Typed Configuration**: An entity's auto-approval settings are a typed,
//!   versioned struct (`AutoApprovalConfig`), never a loose nested object.
//! - **Forward-Only Status**: `RecordStatus::can_transition_to` is the one
//!   place the lifecycle graph is encoded.

pub mod entities;
pub mod errors;
pub mod security;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use security::*;
pub use time::*;
