//! # Verification Race
//!
//! Two coordinators decide the same SUBMITTED record at once. The store is
//! wrapped so both callers finish their read before either conditional
//! write runs, which forces the interleaving the conditional write exists
//! for:
//!
//! ```text
//! verify ──read SUBMITTED──┐            ┌──CAS(SUBMITTED→VERIFIED)──→ ?
//!                          ├─ barrier ──┤
//! reject ──read SUBMITTED──┘            └──CAS(SUBMITTED→REJECTED)──→ ?
//! ```
//!
//! Exactly one CAS finds SUBMITTED; the other matches zero rows and must
//! surface as `StateConflict`.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use shared_types::{
        Actor, ActorId, AuditAction, AutoApprovalConfig, CoreError, Entity, EntityId,
        ManualTimeSource, NewRecord, Priority, RecordId, RecordKind, RecordPayload, RecordStatus,
        RecordType, Role, SubmittedRecord,
    };

    use rc_01_record_store::{
        EntityStore, InMemoryReliefStore, RecordFilter, RecordStore, StatusUpdate, StoreError,
    };
    use rc_02_verification::{
        InMemoryAuditLog, VerificationApi, VerificationConfig, VerificationService,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// In-memory store whose record reads rendezvous in pairs.
    struct GatedStore {
        inner: InMemoryReliefStore,
        gate: Barrier,
    }

    impl GatedStore {
        fn new() -> Self {
            Self {
                inner: InMemoryReliefStore::new(),
                gate: Barrier::new(2),
            }
        }
    }

    #[async_trait]
    impl RecordStore for GatedStore {
        async fn insert_record(&self, record: SubmittedRecord) -> Result<(), StoreError> {
            self.inner.insert_record(record).await
        }

        async fn get_record(&self, id: &RecordId) -> Result<Option<SubmittedRecord>, StoreError> {
            let record = self.inner.get_record(id).await?;
            self.gate.wait().await;
            Ok(record)
        }

        async fn list_records(
            &self,
            filter: &RecordFilter,
        ) -> Result<Vec<SubmittedRecord>, StoreError> {
            self.inner.list_records(filter).await
        }

        async fn conditional_update(
            &self,
            id: &RecordId,
            expected: RecordStatus,
            update: StatusUpdate,
        ) -> Result<Option<SubmittedRecord>, StoreError> {
            self.inner.conditional_update(id, expected, update).await
        }
    }

    #[async_trait]
    impl EntityStore for GatedStore {
        async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>, StoreError> {
            self.inner.get_entity(id).await
        }

        async fn put_entity(&self, entity: Entity) -> Result<(), StoreError> {
            self.inner.put_entity(entity).await
        }

        async fn list_entities(&self) -> Result<Vec<Entity>, StoreError> {
            self.inner.list_entities().await
        }

        async fn set_auto_approval(
            &self,
            ids: &[EntityId],
            config: AutoApprovalConfig,
        ) -> Result<(), StoreError> {
            self.inner.set_auto_approval(ids, config).await
        }
    }

    type GatedService = VerificationService<GatedStore, InMemoryAuditLog, ManualTimeSource>;

    async fn setup() -> (Arc<GatedStore>, Arc<InMemoryAuditLog>, Arc<GatedService>) {
        let store = Arc::new(GatedStore::new());
        store
            .put_entity(Entity {
                id: EntityId::from("camp-2"),
                name: "Camp 2".to_string(),
                entity_type: "SHELTER".to_string(),
                coordinates: None,
                auto_approval: None,
            })
            .await
            .unwrap();
        let audit = Arc::new(InMemoryAuditLog::new());
        let service = Arc::new(VerificationService::new(
            VerificationConfig::default(),
            Arc::clone(&store),
            Arc::clone(&audit),
            Arc::new(ManualTimeSource::new(5_000)),
        ));
        (store, audit, service)
    }

    async fn submitted(service: &GatedService) -> RecordId {
        let record = NewRecord {
            kind: RecordKind::Response,
            record_type: RecordType::Shelter,
            priority: Priority::High,
            entity_id: EntityId::from("camp-2"),
            donor_id: None,
            incident_id: None,
            assessor_id: ActorId::from("responder-1"),
            payload: RecordPayload::default(),
            as_draft: false,
        };
        let submitter = Actor::new("responder-1", &[Role::Responder]);
        service.submit(record, &submitter).await.unwrap().id
    }

    // =============================================================================
    // CONCURRENT DECISIONS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_verify_and_reject_exactly_one_wins() {
        let (store, audit, service) = setup().await;

        for round in 0..10 {
            let id = submitted(&service).await;

            let verifier = Arc::clone(&service);
            let verify = tokio::spawn(async move {
                verifier
                    .verify(&id, &Actor::coordinator("coord-a"), "counted on site")
                    .await
            });
            let rejecter = Arc::clone(&service);
            let reject = tokio::spawn(async move {
                rejecter
                    .reject(&id, &Actor::coordinator("coord-b"), "INCOMPLETE_DATA", "no photos")
                    .await
            });
            let verify = verify.await.unwrap();
            let reject = reject.await.unwrap();

            assert_eq!(
                verify.is_ok() as u8 + reject.is_ok() as u8,
                1,
                "round {round}: exactly one decision commits"
            );
            let loser = match (&verify, &reject) {
                (Ok(_), Err(e)) | (Err(e), Ok(_)) => e.clone(),
                _ => unreachable!(),
            };
            assert!(
                matches!(loser, CoreError::StateConflict { .. }),
                "round {round}: loser saw {loser:?}"
            );

            // Read past the gate; only the winner's fields are written.
            let stored = store.inner.get_record(&id).await.unwrap().unwrap();
            if verify.is_ok() {
                assert_eq!(stored.status, RecordStatus::Verified);
                assert_eq!(stored.verified_by, Some(ActorId::from("coord-a")));
                assert!(stored.rejected_by.is_none());
                assert!(stored.rejection_reason.is_none());
            } else {
                assert_eq!(stored.status, RecordStatus::Rejected);
                assert_eq!(stored.rejected_by, Some(ActorId::from("coord-b")));
                assert!(stored.verified_by.is_none());
            }

            let decisions = audit
                .entries_for(&id.to_string())
                .into_iter()
                .filter(|e| {
                    matches!(e.action, AuditAction::RecordVerified | AuditAction::RecordRejected)
                })
                .count();
            assert_eq!(decisions, 1, "round {round}: one decision audit entry");
        }

        assert_eq!(store.inner.cas_applied(), 10);
    }
}
