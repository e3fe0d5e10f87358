//! Auto-Approval Engine - evaluates submissions and owns rule configuration.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    Actor, AuditAction, AuditEntry, CoreError, CoreResult, EntityId, GatedAction, RecordId,
    TimeSource,
};
use tracing::{debug, info, warn};

use rc_01_record_store::StoreError;
use rc_02_verification::RuleMatch;

use crate::domain::{evaluate, ConfigureAutoApproval, RuleDecision};
use crate::ports::inbound::{AutoApprovalApi, AutoApprovalOutcome, QueueReason};
use crate::ports::outbound::{AuditSink, AutoVerifier, EntityStore, RecordStore};

pub struct AutoApprovalEngine<S, V, A, T>
where
    S: RecordStore + EntityStore,
    V: AutoVerifier,
    A: AuditSink,
    T: TimeSource,
{
    store: Arc<S>,
    verifier: Arc<V>,
    audit: Arc<A>,
    time_source: Arc<T>,
}

impl<S, V, A, T> AutoApprovalEngine<S, V, A, T>
where
    S: RecordStore + EntityStore,
    V: AutoVerifier,
    A: AuditSink,
    T: TimeSource,
{
    pub fn new(store: Arc<S>, verifier: Arc<V>, audit: Arc<A>, time_source: Arc<T>) -> Self {
        Self {
            store,
            verifier,
            audit,
            time_source,
        }
    }
}

#[async_trait]
impl<S, V, A, T> AutoApprovalApi for AutoApprovalEngine<S, V, A, T>
where
    S: RecordStore + EntityStore + 'static,
    V: AutoVerifier + 'static,
    A: AuditSink + 'static,
    T: TimeSource + 'static,
{
    async fn evaluate_submission(&self, record_id: &RecordId) -> CoreResult<AutoApprovalOutcome> {
        let record = match self.store.get_record(record_id).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(CoreError::not_found("record", record_id)),
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "Auto-approval skipped: record lookup failed");
                return Ok(AutoApprovalOutcome::Queued(QueueReason::Unavailable));
            }
        };

        let entity = match self.store.get_entity(&record.entity_id).await {
            Ok(entity) => entity,
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "Auto-approval skipped: entity lookup failed");
                return Ok(AutoApprovalOutcome::Queued(QueueReason::Unavailable));
            }
        };
        let config = entity.as_ref().and_then(|e| e.auto_approval.as_ref());

        let decision = evaluate(&record, config);
        debug!(
            record_id = %record_id,
            entity_id = %record.entity_id,
            decision = decision.as_str(),
            "Auto-approval rule evaluated"
        );
        let Some(config) = config.filter(|_| decision.is_match()) else {
            return Ok(AutoApprovalOutcome::Queued(QueueReason::Rule(decision)));
        };

        let rule = RuleMatch {
            rule_id: config.rule_id(&record.entity_id),
            requires_documentation: config.requires_documentation,
        };
        match self.verifier.auto_verify(record_id, &rule).await {
            Ok(updated) => Ok(AutoApprovalOutcome::AutoVerified(updated)),
            Err(CoreError::StateConflict { .. }) | Err(CoreError::InvalidStateTransition { .. }) => {
                info!(record_id = %record_id, "Auto-approval superseded by a manual decision");
                Ok(AutoApprovalOutcome::Queued(QueueReason::Superseded))
            }
            Err(CoreError::Validation { reason, .. }) => {
                debug!(record_id = %record_id, reason = %reason, "Auto-verify refused");
                Ok(AutoApprovalOutcome::Queued(QueueReason::Rule(
                    RuleDecision::MissingDocumentation,
                )))
            }
            Err(e) => {
                warn!(record_id = %record_id, error = %e, "Auto-verify failed; record stays queued");
                Ok(AutoApprovalOutcome::Queued(QueueReason::Unavailable))
            }
        }
    }

    async fn configure(
        &self,
        request: ConfigureAutoApproval,
        actor: &Actor,
    ) -> CoreResult<Vec<EntityId>> {
        actor.authorize(GatedAction::ConfigureAutoApproval)?;
        request.validate()?;

        let now = self.time_source.now();
        let config = request.to_config(now, &actor.id);

        match self
            .store
            .set_auto_approval(&request.entity_ids, config)
            .await
        {
            Ok(()) => {}
            Err(StoreError::UnknownEntity { id }) => {
                return Err(CoreError::validation(
                    "entityIds",
                    format!("unknown entity {}", id),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        for entity_id in &request.entity_ids {
            let entry = AuditEntry::new(
                actor.id.clone(),
                AuditAction::AutoApprovalConfigured,
                entity_id.to_string(),
                now,
                Some(format!(
                    "enabled={} scope={:?}",
                    request.enabled, request.scope
                )),
            );
            if let Err(e) = self.audit.append(entry).await {
                warn!(entity_id = %entity_id, error = %e, "Failed to append audit entry");
            }
        }

        info!(
            actor = %actor.id,
            entities = request.entity_ids.len(),
            enabled = request.enabled,
            "Auto-approval configured"
        );
        Ok(request.entity_ids)
    }
}
