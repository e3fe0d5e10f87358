//! Verification Service - applies lifecycle transitions against the store.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    Actor, ActorId, AuditAction, AuditEntry, CoreError, CoreResult, GatedAction, NewRecord,
    RecordId, RecordStatus, RejectionReason, SubmittedRecord, TimeSource, SYSTEM_ACTOR,
};
use tracing::{debug, info, warn};

use rc_01_record_store::StatusUpdate;

use crate::domain::{
    build_record, validate_new_record, validate_review_notes, RuleMatch, SubmissionLimits,
    Transition, MAX_REVIEW_NOTES_CHARS,
};
use crate::ports::inbound::{SubmissionReceipt, VerificationApi};
use crate::ports::outbound::{AuditSink, EntityStore, RecordStore};

/// Verification configuration
#[derive(Clone, Debug)]
pub struct VerificationConfig {
    /// Maximum reviewer notes length in characters
    pub max_review_notes_chars: usize,
    /// Bounds on submitted payloads
    pub submission_limits: SubmissionLimits,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            max_review_notes_chars: MAX_REVIEW_NOTES_CHARS,
            submission_limits: SubmissionLimits::default(),
        }
    }
}

/// Verification State Machine service.
pub struct VerificationService<S, A, T>
where
    S: RecordStore + EntityStore,
    A: AuditSink,
    T: TimeSource,
{
    config: VerificationConfig,
    store: Arc<S>,
    audit: Arc<A>,
    time_source: Arc<T>,
}

impl<S, A, T> VerificationService<S, A, T>
where
    S: RecordStore + EntityStore,
    A: AuditSink,
    T: TimeSource,
{
    pub fn new(config: VerificationConfig, store: Arc<S>, audit: Arc<A>, time_source: Arc<T>) -> Self {
        Self {
            config,
            store,
            audit,
            time_source,
        }
    }

    pub fn config(&self) -> &VerificationConfig {
        &self.config
    }

    async fn load(&self, id: &RecordId) -> CoreResult<SubmittedRecord> {
        self.store
            .get_record(id)
            .await?
            .ok_or_else(|| CoreError::not_found("record", id))
    }

    /// Read, check the precondition, then one conditional write.
    async fn apply(
        &self,
        id: &RecordId,
        transition: Transition,
        update: StatusUpdate,
    ) -> CoreResult<SubmittedRecord> {
        let current = self.load(id).await?;
        transition.check(id, current.status)?;

        match self
            .store
            .conditional_update(id, transition.from(), update)
            .await?
        {
            Some(updated) => Ok(updated),
            None => {
                warn!(
                    record_id = %id,
                    action = transition.action(),
                    "Lost transition race; record changed after read"
                );
                Err(CoreError::StateConflict { id: id.to_string() })
            }
        }
    }

    /// Audit failures never undo a committed transition.
    async fn record_audit(&self, entry: AuditEntry) {
        let action = entry.action;
        let resource_id = entry.resource_id.clone();
        if let Err(e) = self.audit.append(entry).await {
            warn!(
                resource_id = %resource_id,
                action = action.as_str(),
                error = %e,
                "Failed to append audit entry"
            );
        }
    }
}

#[async_trait]
impl<S, A, T> VerificationApi for VerificationService<S, A, T>
where
    S: RecordStore + EntityStore + 'static,
    A: AuditSink + 'static,
    T: TimeSource + 'static,
{
    async fn submit(&self, record: NewRecord, actor: &Actor) -> CoreResult<SubmissionReceipt> {
        actor.authorize(GatedAction::SubmitRecord)?;
        validate_new_record(&record, &self.config.submission_limits)?;

        if self.store.get_entity(&record.entity_id).await?.is_none() {
            return Err(CoreError::validation(
                "entityId",
                format!("unknown entity {}", record.entity_id),
            ));
        }

        let now = self.time_source.now();
        let built = build_record(record, now);
        let receipt = SubmissionReceipt {
            id: built.id,
            status: built.status,
        };
        let action = if built.status == RecordStatus::Draft {
            AuditAction::RecordDrafted
        } else {
            AuditAction::RecordSubmitted
        };
        self.store.insert_record(built).await?;

        self.record_audit(AuditEntry::new(
            actor.id.clone(),
            action,
            receipt.id.to_string(),
            now,
            None,
        ))
        .await;

        info!(
            record_id = %receipt.id,
            actor = %actor.id,
            status = %receipt.status,
            "Record created"
        );
        Ok(receipt)
    }

    async fn submit_draft(&self, id: &RecordId, actor: &Actor) -> CoreResult<SubmittedRecord> {
        actor.authorize(GatedAction::SubmitRecord)?;

        let now = self.time_source.now();
        let updated = self
            .apply(id, Transition::SubmitDraft, StatusUpdate::Submit { at: now })
            .await?;

        self.record_audit(AuditEntry::new(
            actor.id.clone(),
            AuditAction::RecordSubmitted,
            id.to_string(),
            now,
            None,
        ))
        .await;

        info!(record_id = %id, actor = %actor.id, "Draft submitted");
        Ok(updated)
    }

    async fn verify(
        &self,
        id: &RecordId,
        actor: &Actor,
        notes: &str,
    ) -> CoreResult<SubmittedRecord> {
        actor.authorize(GatedAction::VerifyRecord)?;
        let notes = validate_review_notes(notes, self.config.max_review_notes_chars)?;

        let now = self.time_source.now();
        let updated = self
            .apply(
                id,
                Transition::Verify,
                StatusUpdate::Verify {
                    by: actor.id.clone(),
                    at: now,
                    notes: notes.clone(),
                },
            )
            .await?;

        self.record_audit(AuditEntry::new(
            actor.id.clone(),
            AuditAction::RecordVerified,
            id.to_string(),
            now,
            Some(notes),
        ))
        .await;

        info!(record_id = %id, actor = %actor.id, "Record verified");
        Ok(updated)
    }

    async fn reject(
        &self,
        id: &RecordId,
        actor: &Actor,
        reason: &str,
        notes: &str,
    ) -> CoreResult<SubmittedRecord> {
        actor.authorize(GatedAction::RejectRecord)?;
        let reason: RejectionReason = reason.parse()?;
        let notes = validate_review_notes(notes, self.config.max_review_notes_chars)?;

        let now = self.time_source.now();
        let updated = self
            .apply(
                id,
                Transition::Reject,
                StatusUpdate::Reject {
                    by: actor.id.clone(),
                    at: now,
                    reason,
                    notes: notes.clone(),
                },
            )
            .await?;

        self.record_audit(AuditEntry::new(
            actor.id.clone(),
            AuditAction::RecordRejected,
            id.to_string(),
            now,
            Some(format!("{}: {}", reason.as_str(), notes)),
        ))
        .await;

        info!(
            record_id = %id,
            actor = %actor.id,
            reason = reason.as_str(),
            "Record rejected"
        );
        Ok(updated)
    }

    async fn auto_verify(&self, id: &RecordId, rule: &RuleMatch) -> CoreResult<SubmittedRecord> {
        let current = self.load(id).await?;
        Transition::AutoVerify.check(id, current.status)?;
        if rule.requires_documentation && !current.payload.has_documentation() {
            debug!(record_id = %id, rule_id = %rule.rule_id, "Auto-verify refused: no documentation");
            return Err(CoreError::validation(
                "payload",
                "rule requires notes or media documentation",
            ));
        }

        let now = self.time_source.now();
        let updated = self
            .apply(id, Transition::AutoVerify, StatusUpdate::AutoVerify { at: now })
            .await?;

        self.record_audit(AuditEntry::new(
            ActorId::from(SYSTEM_ACTOR),
            AuditAction::RecordAutoVerified,
            id.to_string(),
            now,
            Some(format!("rule {}", rule.rule_id)),
        ))
        .await;

        info!(record_id = %id, rule_id = %rule.rule_id, "Record auto-verified");
        Ok(updated)
    }

    async fn get_record(&self, id: &RecordId) -> CoreResult<SubmittedRecord> {
        self.load(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAuditLog;
    use rc_01_record_store::InMemoryReliefStore;
    use shared_types::{
        Entity, EntityId, ManualTimeSource, Priority, RecordKind, RecordPayload, RecordType,
        Role, AUTO_APPROVAL_ACTOR,
    };

    type TestService = VerificationService<InMemoryReliefStore, InMemoryAuditLog, ManualTimeSource>;

    struct Harness {
        service: Arc<TestService>,
        store: Arc<InMemoryReliefStore>,
        audit: Arc<InMemoryAuditLog>,
        clock: Arc<ManualTimeSource>,
    }

    async fn harness() -> Harness {
        let store = Arc::new(InMemoryReliefStore::new());
        store
            .put_entity(Entity {
                id: EntityId::from("clinic-1"),
                name: "North Clinic".into(),
                entity_type: "HEALTH_FACILITY".into(),
                coordinates: None,
                auto_approval: None,
            })
            .await
            .unwrap();
        let audit = Arc::new(InMemoryAuditLog::new());
        let clock = Arc::new(ManualTimeSource::new(1_000));
        let service = Arc::new(VerificationService::new(
            VerificationConfig::default(),
            store.clone(),
            audit.clone(),
            clock.clone(),
        ));
        Harness {
            service,
            store,
            audit,
            clock,
        }
    }

    fn new_record() -> NewRecord {
        NewRecord {
            kind: RecordKind::Assessment,
            record_type: RecordType::Health,
            priority: Priority::Medium,
            entity_id: EntityId::from("clinic-1"),
            donor_id: None,
            incident_id: None,
            assessor_id: ActorId::from("assessor-1"),
            payload: RecordPayload::default(),
            as_draft: false,
        }
    }

    fn assessor() -> Actor {
        Actor::new("assessor-1", &[Role::Assessor])
    }

    fn coordinator() -> Actor {
        Actor::coordinator("coord-1")
    }

    #[tokio::test]
    async fn test_submit_then_verify() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        assert_eq!(receipt.status, RecordStatus::Submitted);

        h.clock.advance(500);
        let verified = h
            .service
            .verify(&receipt.id, &coordinator(), "Counts match site visit")
            .await
            .unwrap();

        assert_eq!(verified.status, RecordStatus::Verified);
        assert_eq!(verified.verified_by, Some(ActorId::from("coord-1")));
        assert_eq!(verified.verified_at, Some(1_500));
        assert_eq!(verified.review_notes.as_deref(), Some("Counts match site visit"));

        let trail = h.audit.entries_for(&receipt.id.to_string());
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[1].action, AuditAction::RecordVerified);
    }

    #[tokio::test]
    async fn test_submit_unknown_entity_is_validation_error() {
        let h = harness().await;
        let mut record = new_record();
        record.entity_id = EntityId::from("nowhere");
        let err = h.service.submit(record, &assessor()).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "entityId"));
    }

    #[tokio::test]
    async fn test_verify_missing_record_is_not_found() {
        let h = harness().await;
        let err = h
            .service
            .verify(&RecordId::new(), &coordinator(), "ok")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_verify_requires_notes() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        let err = h.service.verify(&receipt.id, &coordinator(), "").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));

        let record = h.service.get_record(&receipt.id).await.unwrap();
        assert_eq!(record.status, RecordStatus::Submitted);
    }

    #[tokio::test]
    async fn test_assessor_cannot_verify() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        let err = h
            .service
            .verify(&receipt.id, &assessor(), "looks fine")
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 403);
    }

    #[tokio::test]
    async fn test_terminal_record_cannot_transition_again() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        h.service
            .reject(&receipt.id, &coordinator(), "INCOMPLETE_DATA", "no counts")
            .await
            .unwrap();

        let err = h
            .service
            .verify(&receipt.id, &coordinator(), "changed my mind")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidStateTransition {
                from: RecordStatus::Rejected,
                action: "verify",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_reject_with_unknown_reason() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        let err = h
            .service
            .reject(&receipt.id, &coordinator(), "BAD_VIBES", "no")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_reject_writes_reason() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        let rejected = h
            .service
            .reject(&receipt.id, &coordinator(), "duplicate_submission", "same as r-12")
            .await
            .unwrap();
        assert_eq!(rejected.status, RecordStatus::Rejected);
        assert_eq!(
            rejected.rejection_reason,
            Some(RejectionReason::DuplicateSubmission)
        );
        assert_eq!(rejected.rejected_by, Some(ActorId::from("coord-1")));
        assert!(rejected.verified_by.is_none());
    }

    #[tokio::test]
    async fn test_draft_flow() {
        let h = harness().await;
        let mut draft = new_record();
        draft.as_draft = true;
        let receipt = h.service.submit(draft, &assessor()).await.unwrap();
        assert_eq!(receipt.status, RecordStatus::Draft);

        let err = h
            .service
            .verify(&receipt.id, &coordinator(), "too early")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidStateTransition { .. }));

        h.clock.advance(100);
        let submitted = h.service.submit_draft(&receipt.id, &assessor()).await.unwrap();
        assert_eq!(submitted.status, RecordStatus::Submitted);
        assert_eq!(submitted.submitted_at, Some(1_100));
        assert_eq!(h.audit.count_action(AuditAction::RecordDrafted), 1);
        assert_eq!(h.audit.count_action(AuditAction::RecordSubmitted), 1);
    }

    #[tokio::test]
    async fn test_auto_verify_rechecks_documentation() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        let rule = RuleMatch {
            rule_id: "clinic-1:v1@0".into(),
            requires_documentation: true,
        };
        let err = h.service.auto_verify(&receipt.id, &rule).await.unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));

        let relaxed = RuleMatch {
            requires_documentation: false,
            ..rule
        };
        let record = h.service.auto_verify(&receipt.id, &relaxed).await.unwrap();
        assert_eq!(record.status, RecordStatus::AutoVerified);
        assert_eq!(record.verified_by, Some(ActorId::from(AUTO_APPROVAL_ACTOR)));

        let entry = h
            .audit
            .entries_for(&receipt.id.to_string())
            .pop()
            .unwrap();
        assert_eq!(entry.actor, ActorId::from(SYSTEM_ACTOR));
        assert_eq!(entry.action, AuditAction::RecordAutoVerified);
    }

    #[tokio::test]
    async fn test_audit_failure_does_not_undo_transition() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        h.audit.set_available(false);

        let verified = h
            .service
            .verify(&receipt.id, &coordinator(), "confirmed")
            .await
            .unwrap();
        assert_eq!(verified.status, RecordStatus::Verified);
        let stored = h.store.get_record(&receipt.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RecordStatus::Verified);
    }

    #[tokio::test]
    async fn test_store_outage_is_generic_internal_error() {
        let h = harness().await;
        let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();
        h.store.set_available(false);
        let err = h
            .service
            .verify(&receipt.id, &coordinator(), "confirmed")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(!err.to_string().contains("in-memory"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_verify_and_reject_single_winner() {
        for _ in 0..20 {
            let h = harness().await;
            let receipt = h.service.submit(new_record(), &assessor()).await.unwrap();

            let verifier = h.service.clone();
            let rejecter = h.service.clone();
            let id = receipt.id;
            let verify = tokio::spawn(async move {
                verifier.verify(&id, &Actor::coordinator("coord-a"), "ok").await
            });
            let reject = tokio::spawn(async move {
                rejecter
                    .reject(&id, &Actor::coordinator("coord-b"), "OTHER", "no")
                    .await
            });
            let outcomes = [verify.await.unwrap(), reject.await.unwrap()];

            let winners = outcomes.iter().filter(|o| o.is_ok()).count();
            assert_eq!(winners, 1);
            for outcome in &outcomes {
                if let Err(err) = outcome {
                    // The loser either saw the other decision on read or lost the CAS.
                    assert!(matches!(
                        err,
                        CoreError::StateConflict { .. } | CoreError::InvalidStateTransition { .. }
                    ));
                }
            }

            let stored = h.store.get_record(&id).await.unwrap().unwrap();
            match stored.status {
                RecordStatus::Verified => {
                    assert!(stored.rejection_reason.is_none());
                    assert!(stored.rejected_by.is_none());
                }
                RecordStatus::Rejected => {
                    assert!(stored.verified_by.is_none());
                    assert!(stored.verified_at.is_none());
                }
                other => panic!("unexpected status {other}"),
            }
            let decisions = h.audit.count_action(AuditAction::RecordVerified)
                + h.audit.count_action(AuditAction::RecordRejected);
            assert_eq!(decisions, 1);
        }
    }
}
