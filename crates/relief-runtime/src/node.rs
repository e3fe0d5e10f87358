//! # Relief Node
//!
//! The façade the external boundary calls. Each call is forwarded to one
//! component and leaves a metric sample and a structured log line behind.
//!
//! ## Submission Flow
//!
//! ```text
//! submit ──→ VerificationService::submit ──→ committed as SUBMITTED
//!                                                   │
//!                      AutoApprovalEngine::evaluate_submission
//!                                                   │
//!                      ┌────────────────────────────┴──────────┐
//!                      ↓                                       ↓
//!               AUTO_VERIFIED                         stays queued
//!        (receipt reports AUTO_VERIFIED)       (receipt reports SUBMITTED)
//! ```
//!
//! A failing evaluation never fails the submission; the record is already
//! committed and simply stays in the manual queue.

use std::sync::Arc;

use shared_types::{
    Actor, ApprovalScope, CoreError, CoreResult, DonorId, EntityId, IncidentId, NewRecord,
    Priority, RecordId, RecordStatus, SubmittedRecord, SystemTimeSource, TimeSource,
};
use tracing::{debug, info, warn};

use rc_02_verification::{SubmissionReceipt, VerificationApi};
use rc_03_auto_approval::{
    ApprovalConditions, AutoApprovalApi, AutoApprovalOutcome, ConfigureAutoApproval, QueueReason,
};
use rc_04_population_impact::{PopulationImpact, PopulationImpactApi};
use rc_05_donor_scoring::{DonorLeaderboard, DonorScoringApi, SortKey, TimeWindow};
use rc_06_queue_metrics::{QueueFilter, QueueMetricsApi, QueuePage};
use relief_telemetry::{
    log_donor_event, log_record_event, HistogramTimer, AUTO_APPROVAL_DECISIONS, ERRORS,
    QUEUE_DEPTH, RECORDS_SUBMITTED, SCORING_PASSES, SCORING_PASS_DURATION, STATE_CONFLICTS,
    TRANSITIONS,
};

use crate::container::{ConfigError, ReliefConfig, ServiceContainer};
use crate::seed::{apply_seed, SeedError, SeedReport, SeedSnapshot};

/// The relief verification core, wired and ready to serve calls.
pub struct ReliefNode<T: TimeSource + 'static = SystemTimeSource> {
    services: ServiceContainer<T>,
}

impl ReliefNode<SystemTimeSource> {
    /// Create a node on the wall clock.
    pub fn new(config: ReliefConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemTimeSource))
    }
}

impl<T: TimeSource + 'static> ReliefNode<T> {
    pub fn with_clock(config: ReliefConfig, time_source: Arc<T>) -> Result<Self, ConfigError> {
        Ok(Self {
            services: ServiceContainer::new(config, time_source)?,
        })
    }

    /// Wrap an already built container.
    pub fn from_services(services: ServiceContainer<T>) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &ServiceContainer<T> {
        &self.services
    }

    /// Load a snapshot straight into the store, bypassing the lifecycle.
    pub async fn load_seed(&self, snapshot: SeedSnapshot) -> Result<SeedReport, SeedError> {
        apply_seed(self.services.store.as_ref(), snapshot).await
    }

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    /// Accept a new record. The receipt's status reflects auto-approval
    /// when it fired.
    pub async fn submit(&self, record: NewRecord, actor: &Actor) -> CoreResult<SubmissionReceipt> {
        let kind = record.kind;
        let mut receipt = self
            .services
            .verification
            .submit(record, actor)
            .await
            .map_err(|e| observe_error("verification", e))?;

        if receipt.status == RecordStatus::Submitted {
            if let Some(auto_verified) = self.run_auto_approval(&receipt.id).await {
                receipt.status = auto_verified.status;
            }
        }

        RECORDS_SUBMITTED
            .with_label_values(&[kind.as_str(), receipt.status.as_str()])
            .inc();
        log_record_event!(
            info,
            "runtime",
            "Record accepted",
            receipt.id,
            actor = %actor.id,
            status = receipt.status.as_str()
        );
        Ok(receipt)
    }

    /// Move a draft into the queue, then give auto-approval its chance.
    pub async fn submit_draft(&self, id: &RecordId, actor: &Actor) -> CoreResult<SubmittedRecord> {
        let result = self.services.verification.submit_draft(id, actor).await;
        let record = record_transition("submit", id, result)?;
        match self.run_auto_approval(id).await {
            Some(auto_verified) => Ok(auto_verified),
            None => Ok(record),
        }
    }

    pub async fn verify(
        &self,
        id: &RecordId,
        actor: &Actor,
        notes: &str,
    ) -> CoreResult<SubmittedRecord> {
        let result = self.services.verification.verify(id, actor, notes).await;
        record_transition("verify", id, result)
    }

    pub async fn reject(
        &self,
        id: &RecordId,
        actor: &Actor,
        reason: &str,
        notes: &str,
    ) -> CoreResult<SubmittedRecord> {
        let result = self
            .services
            .verification
            .reject(id, actor, reason, notes)
            .await;
        record_transition("reject", id, result)
    }

    /// Evaluate a freshly SUBMITTED record. `Some` only when it was
    /// auto-verified; every failure degrades to leaving it queued.
    async fn run_auto_approval(&self, id: &RecordId) -> Option<SubmittedRecord> {
        match self.services.auto_approval.evaluate_submission(id).await {
            Ok(outcome) => {
                AUTO_APPROVAL_DECISIONS
                    .with_label_values(&[outcome.label()])
                    .inc();
                match outcome {
                    AutoApprovalOutcome::AutoVerified(record) => {
                        TRANSITIONS.with_label_values(&["auto-verify", "ok"]).inc();
                        Some(record)
                    }
                    AutoApprovalOutcome::Queued(reason) => {
                        if reason == QueueReason::Superseded {
                            STATE_CONFLICTS.inc();
                        }
                        debug!(record_id = %id, reason = reason.as_str(), "Record left in queue");
                        None
                    }
                }
            }
            Err(e) => {
                warn!(record_id = %id, error = %e, "Auto-approval evaluation failed; record stays queued");
                observe_error("auto_approval", e);
                None
            }
        }
    }

    // =========================================================================
    // AUTO-APPROVAL CONFIGURATION
    // =========================================================================

    /// Write one rule to every listed entity, all or none.
    pub async fn configure_auto_approval(
        &self,
        entity_ids: Vec<EntityId>,
        enabled: bool,
        scope: ApprovalScope,
        conditions: ApprovalConditions,
        actor: &Actor,
    ) -> CoreResult<Vec<EntityId>> {
        let request = ConfigureAutoApproval {
            entity_ids,
            enabled,
            scope,
            conditions,
        };
        let updated = self
            .services
            .auto_approval
            .configure(request, actor)
            .await
            .map_err(|e| observe_error("auto_approval", e))?;
        info!(
            actor = %actor.id,
            entities = updated.len(),
            enabled,
            "Auto-approval configured"
        );
        Ok(updated)
    }

    // =========================================================================
    // AGGREGATORS
    // =========================================================================

    /// One page of the manual queue with its depth and health metrics.
    pub async fn list_queue(
        &self,
        filter: &QueueFilter,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> CoreResult<QueuePage> {
        let queue_page = self
            .services
            .queue
            .list_queue(filter, page, limit)
            .await
            .map_err(|e| observe_error("queue", e))?;

        // A narrowed view is not the queue's depth.
        if *filter == QueueFilter::default() {
            for priority in [Priority::Low, Priority::Medium, Priority::High, Priority::Critical] {
                QUEUE_DEPTH
                    .with_label_values(&[priority.as_str()])
                    .set(queue_page.queue_depth.get(priority) as f64);
            }
        }
        debug!(
            total = queue_page.pagination.total,
            page = queue_page.pagination.page,
            "Queue listed"
        );
        Ok(queue_page)
    }

    /// Run a scoring pass and return the leaderboard, or one donor's row.
    /// Unset window and sort fall back to the configured defaults.
    pub async fn donor_metrics(
        &self,
        donor_id: Option<&DonorId>,
        window: Option<TimeWindow>,
        sort: Option<SortKey>,
    ) -> CoreResult<DonorLeaderboard> {
        let query = self.services.scoring.config().query(window, sort);
        let result = {
            let _timer = HistogramTimer::new(&SCORING_PASS_DURATION);
            self.services.scoring.donor_metrics(donor_id, query).await
        };
        match result {
            Ok(leaderboard) => {
                SCORING_PASSES.with_label_values(&["ok"]).inc();
                if let Some(card) = donor_id.and(leaderboard.donors.first()) {
                    log_donor_event!(
                        debug,
                        "scoring",
                        "Donor standing read",
                        card.donor_id,
                        rank = card.rank,
                        trend = ?card.trend
                    );
                }
                Ok(leaderboard)
            }
            Err(e) => {
                SCORING_PASSES.with_label_values(&[e.code()]).inc();
                Err(observe_error("scoring", e))
            }
        }
    }

    pub async fn population_impact(&self, incident_id: &IncidentId) -> CoreResult<PopulationImpact> {
        let impact = self
            .services
            .impact
            .calculate_impact(incident_id)
            .await
            .map_err(|e| observe_error("impact", e))?;
        debug!(
            incident_id = %incident_id,
            assessments = impact.assessment_count,
            "Population impact calculated"
        );
        Ok(impact)
    }
}

/// Count an error against its component and hand it back unchanged.
fn observe_error(component: &str, err: CoreError) -> CoreError {
    ERRORS.with_label_values(&[component, err.code()]).inc();
    err
}

fn record_transition(
    action: &str,
    id: &RecordId,
    result: CoreResult<SubmittedRecord>,
) -> CoreResult<SubmittedRecord> {
    match result {
        Ok(record) => {
            TRANSITIONS.with_label_values(&[action, "ok"]).inc();
            log_record_event!(
                info,
                "runtime",
                "Transition committed",
                id,
                action,
                status = record.status.as_str()
            );
            Ok(record)
        }
        Err(e) => {
            TRANSITIONS.with_label_values(&[action, e.code()]).inc();
            if matches!(e, CoreError::StateConflict { .. }) {
                STATE_CONFLICTS.inc();
                log_record_event!(warn, "runtime", "Lost decision race", id, action);
            }
            Err(observe_error("verification", e))
        }
    }
}
