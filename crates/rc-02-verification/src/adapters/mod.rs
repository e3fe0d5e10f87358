//! Adapters for the Verification State Machine.

pub mod audit_log;

pub use audit_log::InMemoryAuditLog;
