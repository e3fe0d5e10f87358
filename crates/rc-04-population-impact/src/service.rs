//! Population Impact Service - read-only aggregation over the record store.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{CoreError, CoreResult, IncidentId, RecordKind};
use tracing::debug;

use rc_01_record_store::RecordFilter;

use crate::domain::{aggregate, PopulationImpact};
use crate::ports::inbound::PopulationImpactApi;
use crate::ports::outbound::{IncidentRegistry, RecordStore};

pub struct PopulationImpactService<S>
where
    S: RecordStore + IncidentRegistry,
{
    store: Arc<S>,
}

impl<S> PopulationImpactService<S>
where
    S: RecordStore + IncidentRegistry,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S> PopulationImpactApi for PopulationImpactService<S>
where
    S: RecordStore + IncidentRegistry + 'static,
{
    async fn calculate_impact(&self, incident_id: &IncidentId) -> CoreResult<PopulationImpact> {
        if self.store.get_incident(incident_id).await?.is_none() {
            return Err(CoreError::not_found("incident", incident_id));
        }

        let filter = RecordFilter::new()
            .with_kind(RecordKind::Assessment)
            .with_incident(incident_id.clone());
        let assessments = self.store.list_records(&filter).await?;
        let impact = aggregate(&assessments);

        debug!(
            incident_id = %incident_id,
            assessments = impact.assessment_count,
            "Population impact aggregated"
        );
        Ok(impact)
    }
}
