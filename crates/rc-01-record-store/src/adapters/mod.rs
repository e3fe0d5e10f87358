//! # Adapters
//!
//! Production deployments provide a transactional database adapter; the
//! in-memory adapter backs tests and the demo runtime.

pub mod memory;

pub use memory::InMemoryReliefStore;
