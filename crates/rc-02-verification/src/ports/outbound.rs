//! Driven Ports (SPI - Outbound)
//!
//! Record and entity storage come from `rc-01-record-store`; the audit trail
//! is the one dependency owned here.

use async_trait::async_trait;
use shared_types::AuditEntry;

use crate::domain::AuditError;

pub use rc_01_record_store::{EntityStore, RecordStore};

/// Append-only audit log.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn append(&self, entry: AuditEntry) -> Result<(), AuditError>;
}
