//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use shared_types::{CoreResult, IncidentId};

use crate::domain::PopulationImpact;

#[async_trait]
pub trait PopulationImpactApi: Send + Sync {
    /// Aggregate every assessment linked to `incident_id`, whatever its status.
    ///
    /// An unknown incident is `NotFound`; a known incident with no linked
    /// assessments yields an all-zero snapshot.
    async fn calculate_impact(&self, incident_id: &IncidentId) -> CoreResult<PopulationImpact>;
}
