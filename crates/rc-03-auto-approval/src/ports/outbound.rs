//! Driven Ports (SPI - Outbound)

use async_trait::async_trait;
use shared_types::{CoreResult, RecordId, SubmittedRecord};

use rc_02_verification::{RuleMatch, VerificationApi};

pub use rc_01_record_store::{EntityStore, RecordStore};
pub use rc_02_verification::AuditSink;

/// The state-machine entry point the engine is allowed to call.
#[async_trait]
pub trait AutoVerifier: Send + Sync {
    async fn auto_verify(&self, id: &RecordId, rule: &RuleMatch) -> CoreResult<SubmittedRecord>;
}

#[async_trait]
impl<V: VerificationApi> AutoVerifier for V {
    async fn auto_verify(&self, id: &RecordId, rule: &RuleMatch) -> CoreResult<SubmittedRecord> {
        VerificationApi::auto_verify(self, id, rule).await
    }
}
