//! # Domain Layer - Record Store
//!
//! - `errors`: StoreError enumeration
//! - `filter`: RecordFilter query predicate
//! - `update`: StatusUpdate, the field writes a transition performs

pub mod errors;
pub mod filter;
pub mod update;

pub use errors::*;
pub use filter::*;
pub use update::*;
