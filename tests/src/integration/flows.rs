//! # Integration Test Flows
//!
//! Whole-system flows through `ReliefNode`, on the in-memory store and a
//! manual clock.
//!
//! ## Flows Tested:
//!
//! 1. **Submit → Auto-Approval → Verification**: a matching record is
//!    auto-verified inside the submit call; a non-matching one stays queued
//! 2. **Queue → Coordinator decision**: a queued record leaves the queue once
//!    decided, and the decision shows up in the verification rate
//! 3. **Assessments → Population Impact**: linked assessments aggregate into
//!    one snapshot
//! 4. **Commitments + Responses → Donor Leaderboard**: a scoring pass writes
//!    standings back to the ledger

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::{
        Actor, ActorId, ApprovalScope, AuditAction, Commitment, CommitmentStatus, Donor, DonorId,
        Entity, EntityId, GeoPoint, ImpactFigures, Incident, IncidentId, ManualTimeSource,
        NewRecord, Priority, RecordKind, RecordPayload, RecordStatus, RecordType, Role,
        AUTO_APPROVAL_ACTOR, MILLIS_PER_HOUR,
    };

    use rc_01_record_store::{DonorLedger, EntityStore, IncidentRegistry};
    use rc_02_verification::VerificationApi;
    use rc_03_auto_approval::ApprovalConditions;
    use rc_06_queue_metrics::QueueFilter;
    use relief_runtime::{ReliefConfig, ReliefNode, SeedSnapshot};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const START: u64 = 1_000 * MILLIS_PER_HOUR;

    async fn node() -> (ReliefNode<ManualTimeSource>, Arc<ManualTimeSource>) {
        let clock = Arc::new(ManualTimeSource::new(START));
        let node = ReliefNode::with_clock(ReliefConfig::default(), Arc::clone(&clock)).unwrap();
        let store = &node.services().store;
        for (id, entity_type) in [("clinic-7", "HEALTH_FACILITY"), ("camp-2", "SHELTER")] {
            store
                .put_entity(Entity {
                    id: EntityId::from(id),
                    name: id.to_uppercase(),
                    entity_type: entity_type.to_string(),
                    coordinates: None,
                    auto_approval: None,
                })
                .await
                .unwrap();
        }
        (node, clock)
    }

    fn response(entity: &str, record_type: RecordType, priority: Priority) -> NewRecord {
        NewRecord {
            kind: RecordKind::Response,
            record_type,
            priority,
            entity_id: EntityId::from(entity),
            donor_id: None,
            incident_id: None,
            assessor_id: ActorId::from("responder-1"),
            payload: RecordPayload::default(),
            as_draft: false,
        }
    }

    fn assessment(incident: &str, lives_lost: u64, lat: f64, lng: f64) -> NewRecord {
        NewRecord {
            kind: RecordKind::Assessment,
            record_type: RecordType::Population,
            priority: Priority::High,
            entity_id: EntityId::from("camp-2"),
            donor_id: None,
            incident_id: Some(IncidentId::from(incident)),
            assessor_id: ActorId::from("assessor-1"),
            payload: RecordPayload {
                coordinates: Some(GeoPoint::new(lat, lng)),
                impact: Some(ImpactFigures {
                    lives_lost: Some(lives_lost),
                    ..ImpactFigures::default()
                }),
                ..RecordPayload::default()
            },
            as_draft: false,
        }
    }

    fn field_worker() -> Actor {
        Actor::new("responder-1", &[Role::Responder, Role::Assessor])
    }

    fn admin() -> Actor {
        Actor::new("admin-1", &[Role::Admin])
    }

    async fn enable_health_rule(node: &ReliefNode<ManualTimeSource>) {
        let updated = node
            .configure_auto_approval(
                vec![EntityId::from("clinic-7")],
                true,
                ApprovalScope::Responses,
                ApprovalConditions {
                    types_allowed: Some(vec![RecordType::Health]),
                    max_priority: Some(Priority::Medium),
                    requires_documentation: false,
                },
                &admin(),
            )
            .await
            .unwrap();
        assert_eq!(updated, vec![EntityId::from("clinic-7")]);
    }

    // =============================================================================
    // SUBMIT → AUTO-APPROVAL → VERIFICATION
    // =============================================================================

    /// MEDIUM health response matches the rule, CRITICAL exceeds the cap
    #[tokio::test]
    async fn test_rule_auto_verifies_within_cap_only() {
        let (node, _clock) = node().await;
        enable_health_rule(&node).await;

        let medium = node
            .submit(response("clinic-7", RecordType::Health, Priority::Medium), &field_worker())
            .await
            .unwrap();
        assert_eq!(medium.status, RecordStatus::AutoVerified);

        let record = node.services().verification.get_record(&medium.id).await.unwrap();
        assert_eq!(record.verified_by, Some(ActorId::from(AUTO_APPROVAL_ACTOR)));
        assert_eq!(record.verified_at, Some(START));

        let critical = node
            .submit(response("clinic-7", RecordType::Health, Priority::Critical), &field_worker())
            .await
            .unwrap();
        assert_eq!(critical.status, RecordStatus::Submitted);

        let audit = &node.services().audit;
        assert_eq!(audit.count_action(AuditAction::RecordAutoVerified), 1);
    }

    /// Rules are per entity: the same record at another entity is queued
    #[tokio::test]
    async fn test_rule_does_not_leak_across_entities() {
        let (node, _clock) = node().await;
        enable_health_rule(&node).await;

        let receipt = node
            .submit(response("camp-2", RecordType::Health, Priority::Low), &field_worker())
            .await
            .unwrap();
        assert_eq!(receipt.status, RecordStatus::Submitted);
    }

    /// A malformed persisted rule loads as "no rule" and never auto-approves
    #[tokio::test]
    async fn test_seeded_stale_rule_is_disabled() {
        let (node, _clock) = node().await;
        let snapshot = SeedSnapshot::from_json(
            r#"{
                "entities": [{
                    "id": "clinic-9",
                    "name": "Clinic 9",
                    "entityType": "HEALTH_FACILITY",
                    "autoApproval": {
                        "schemaVersion": 0,
                        "enabled": true,
                        "scope": "both",
                        "requiresDocumentation": false,
                        "updatedAt": 0
                    }
                }]
            }"#,
        )
        .unwrap();
        let report = node.load_seed(snapshot).await.unwrap();
        assert_eq!(report.rules_dropped, 1);

        let receipt = node
            .submit(response("clinic-9", RecordType::Health, Priority::Low), &field_worker())
            .await
            .unwrap();
        assert_eq!(receipt.status, RecordStatus::Submitted);
    }

    // =============================================================================
    // QUEUE → COORDINATOR DECISION
    // =============================================================================

    #[tokio::test]
    async fn test_decisions_drain_queue_and_feed_rate() {
        let (node, clock) = node().await;
        let coordinator = Actor::coordinator("coord-1");

        let first = node
            .submit(response("camp-2", RecordType::Shelter, Priority::Low), &field_worker())
            .await
            .unwrap();
        clock.advance(MILLIS_PER_HOUR);
        let second = node
            .submit(response("camp-2", RecordType::Food, Priority::Critical), &field_worker())
            .await
            .unwrap();
        clock.advance(MILLIS_PER_HOUR);

        let page = node.list_queue(&QueueFilter::default(), None, None).await.unwrap();
        let ids: Vec<_> = page.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id], "critical first");
        assert_eq!(page.metrics.average_wait_ms, (2 * MILLIS_PER_HOUR + MILLIS_PER_HOUR) / 2);
        assert_eq!(page.metrics.oldest_pending, Some(START));

        node.verify(&second.id, &coordinator, "delivered and counted")
            .await
            .unwrap();
        node.reject(&first.id, &coordinator, "INCOMPLETE_DATA", "no photos")
            .await
            .unwrap();

        let page = node.list_queue(&QueueFilter::default(), None, None).await.unwrap();
        assert_eq!(page.queue_depth.total, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.metrics.verified_in_window, 1);
        assert_eq!(page.metrics.rejected_in_window, 1);
        assert_eq!(page.metrics.verification_rate, 0.5);
    }

    #[tokio::test]
    async fn test_queue_page_bounds() {
        let (node, _clock) = node().await;
        let err = node
            .list_queue(&QueueFilter::default(), Some(1), Some(101))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = node
            .list_queue(&QueueFilter::default(), Some(0), None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let empty = node.list_queue(&QueueFilter::default(), None, None).await.unwrap();
        assert_eq!(empty.pagination.total, 0);
        assert_eq!(empty.metrics.average_wait_ms, 0);
    }

    #[tokio::test]
    async fn test_terminal_records_stay_terminal() {
        let (node, _clock) = node().await;
        let coordinator = Actor::coordinator("coord-1");
        let receipt = node
            .submit(response("camp-2", RecordType::Wash, Priority::Medium), &field_worker())
            .await
            .unwrap();
        node.reject(&receipt.id, &coordinator, "OUT_OF_SCOPE", "not our camp")
            .await
            .unwrap();

        let err = node
            .verify(&receipt.id, &coordinator, "second look")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE_TRANSITION");
        let err = node
            .submit_draft(&receipt.id, &field_worker())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_STATE_TRANSITION");
    }

    // =============================================================================
    // ASSESSMENTS → POPULATION IMPACT
    // =============================================================================

    #[tokio::test]
    async fn test_incident_impact_from_linked_assessments() {
        let (node, _clock) = node().await;
        node.services()
            .store
            .put_incident(Incident {
                id: IncidentId::from("flood-1"),
                name: "River flood".to_string(),
                incident_type: "FLOOD".to_string(),
                created_at: START,
            })
            .await
            .unwrap();

        for (lives_lost, lat, lng) in [(1, 6.0, 3.0), (2, 7.0, 4.0), (3, 5.0, 2.0)] {
            node.submit(assessment("flood-1", lives_lost, lat, lng), &field_worker())
                .await
                .unwrap();
        }
        // Linked to another incident; must not count.
        node.services()
            .store
            .put_incident(Incident {
                id: IncidentId::from("quake-2"),
                name: "Quake".to_string(),
                incident_type: "EARTHQUAKE".to_string(),
                created_at: START,
            })
            .await
            .unwrap();
        node.submit(assessment("quake-2", 50, 10.0, 10.0), &field_worker())
            .await
            .unwrap();

        let impact = node
            .population_impact(&IncidentId::from("flood-1"))
            .await
            .unwrap();
        assert_eq!(impact.lives_lost, 6);
        assert_eq!(impact.assessment_count, 3);
        assert_eq!(impact.epicenter, Some(GeoPoint::new(6.0, 3.0)));

        let again = node
            .population_impact(&IncidentId::from("flood-1"))
            .await
            .unwrap();
        assert_eq!(again, impact);
    }

    // =============================================================================
    // COMMITMENTS + RESPONSES → DONOR LEADERBOARD
    // =============================================================================

    #[tokio::test]
    async fn test_scoring_pass_writes_standings() {
        let (node, _clock) = node().await;
        let store = &node.services().store;
        let coordinator = Actor::coordinator("coord-1");
        store.put_donor(Donor::new("alpha", "Alpha Aid")).await.unwrap();
        store.put_donor(Donor::new("beta", "Beta Relief")).await.unwrap();

        for (status, verified) in [(CommitmentStatus::Complete, 10.0), (CommitmentStatus::Planned, 0.0)] {
            store
                .put_commitment(Commitment {
                    id: uuid::Uuid::new_v4(),
                    donor_id: DonorId::from("alpha"),
                    entity_id: EntityId::from("camp-2"),
                    incident_id: None,
                    status,
                    committed_quantity: 10.0,
                    delivered_quantity: verified,
                    verified_delivery_quantity: verified,
                    created_at: START,
                })
                .await
                .unwrap();
        }

        let mut ids = Vec::new();
        for _ in 0..2 {
            let record = NewRecord {
                donor_id: Some(DonorId::from("alpha")),
                ..response("camp-2", RecordType::Food, Priority::Medium)
            };
            ids.push(node.submit(record, &field_worker()).await.unwrap().id);
        }
        node.verify(&ids[0], &coordinator, "received").await.unwrap();
        node.reject(&ids[1], &coordinator, "INSUFFICIENT_EVIDENCE", "no receipt")
            .await
            .unwrap();

        let leaderboard = node
            .donor_metrics(Some(&DonorId::from("alpha")), None, None)
            .await
            .unwrap();
        assert_eq!(leaderboard.donors.len(), 1);
        let alpha = &leaderboard.donors[0];
        assert_eq!(alpha.metrics.commitments.fulfillment_rate, 0.5);
        assert_eq!(alpha.metrics.responses.verification_rate, 0.5);
        assert_eq!(alpha.metrics.combined.total_activities, 4);
        assert_eq!(alpha.metrics.combined.verified_activities, 2);
        assert_eq!(alpha.metrics.combined.overall_success_rate, 0.5);
        assert_eq!(alpha.rank, 1);

        let persisted = store.get_donor(&DonorId::from("alpha")).await.unwrap().unwrap();
        assert_eq!(persisted.leaderboard_rank, Some(1));
        assert_eq!(persisted.ranked_at, Some(START));
        let beta = store.get_donor(&DonorId::from("beta")).await.unwrap().unwrap();
        assert_eq!(beta.leaderboard_rank, Some(2));
    }
}
