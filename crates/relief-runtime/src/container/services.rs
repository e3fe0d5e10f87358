//! Concrete service graph.
//!
//! Every component shares one store and one audit log. The verification
//! service is held behind an `Arc` so the auto-approval engine can drive it
//! through its `AutoVerifier` port.

use std::sync::Arc;

use shared_types::TimeSource;
use tracing::info;

use rc_01_record_store::InMemoryReliefStore;
use rc_02_verification::{InMemoryAuditLog, VerificationService};
use rc_03_auto_approval::AutoApprovalEngine;
use rc_04_population_impact::PopulationImpactService;
use rc_05_donor_scoring::DonorScoringService;
use rc_06_queue_metrics::QueueMetricsService;

use crate::container::config::{ConfigError, ReliefConfig};

pub type Verification<T> = VerificationService<InMemoryReliefStore, InMemoryAuditLog, T>;
pub type AutoApproval<T> =
    AutoApprovalEngine<InMemoryReliefStore, Verification<T>, InMemoryAuditLog, T>;
pub type Impact = PopulationImpactService<InMemoryReliefStore>;
pub type Scoring<T> = DonorScoringService<InMemoryReliefStore, T>;
pub type Queue<T> = QueueMetricsService<InMemoryReliefStore, T>;

/// Central container holding all service instances.
pub struct ServiceContainer<T: TimeSource + 'static> {
    pub config: ReliefConfig,
    pub store: Arc<InMemoryReliefStore>,
    pub audit: Arc<InMemoryAuditLog>,
    pub verification: Arc<Verification<T>>,
    pub auto_approval: AutoApproval<T>,
    pub impact: Impact,
    pub scoring: Scoring<T>,
    pub queue: Queue<T>,
}

impl<T: TimeSource + 'static> ServiceContainer<T> {
    /// Build every service over a fresh store and audit log.
    pub fn new(config: ReliefConfig, time_source: Arc<T>) -> Result<Self, ConfigError> {
        Self::with_backends(
            config,
            Arc::new(InMemoryReliefStore::new()),
            Arc::new(InMemoryAuditLog::new()),
            time_source,
        )
    }

    /// Build every service over caller-supplied backends.
    pub fn with_backends(
        config: ReliefConfig,
        store: Arc<InMemoryReliefStore>,
        audit: Arc<InMemoryAuditLog>,
        time_source: Arc<T>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let verification = Arc::new(VerificationService::new(
            config.verification.clone(),
            Arc::clone(&store),
            Arc::clone(&audit),
            Arc::clone(&time_source),
        ));
        let auto_approval = AutoApprovalEngine::new(
            Arc::clone(&store),
            Arc::clone(&verification),
            Arc::clone(&audit),
            Arc::clone(&time_source),
        );
        let impact = PopulationImpactService::new(Arc::clone(&store));
        let scoring = DonorScoringService::new(
            config.scoring.clone(),
            Arc::clone(&store),
            Arc::clone(&time_source),
        )
        .map_err(|e| ConfigError::InvalidScoreWeights(e.to_string()))?;
        let queue = QueueMetricsService::new(
            config.queue.clone(),
            Arc::clone(&store),
            Arc::clone(&time_source),
        );

        info!(
            max_review_notes_chars = config.verification.max_review_notes_chars,
            default_window = %config.scoring.default_window,
            default_sort = %config.scoring.default_sort,
            "Service container initialized"
        );

        Ok(Self {
            config,
            store,
            audit,
            verification,
            auto_approval,
            impact,
            scoring,
            queue,
        })
    }
}
