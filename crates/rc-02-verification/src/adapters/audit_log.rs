//! In-memory audit log.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{AuditAction, AuditEntry};

use crate::domain::AuditError;
use crate::ports::outbound::AuditSink;

/// Keeps every appended entry in insertion order.
#[derive(Debug)]
pub struct InMemoryAuditLog {
    entries: RwLock<Vec<AuditEntry>>,
    available: AtomicBool,
}

impl Default for InMemoryAuditLog {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// When false, `append` fails with `Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().clone()
    }

    pub fn entries_for(&self, resource_id: &str) -> Vec<AuditEntry> {
        self.entries
            .read()
            .iter()
            .filter(|e| e.resource_id == resource_id)
            .cloned()
            .collect()
    }

    pub fn count_action(&self, action: AuditAction) -> usize {
        self.entries
            .read()
            .iter()
            .filter(|e| e.action == action)
            .count()
    }
}

#[async_trait]
impl AuditSink for InMemoryAuditLog {
    async fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(AuditError::Unavailable {
                reason: "in-memory audit log marked unavailable".to_string(),
            });
        }
        self.entries.write().push(entry);
        Ok(())
    }
}
