//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{CoreResult, SubmittedRecord};

use crate::domain::{Pagination, QueueDepth, QueueFilter, QueueMetrics};

/// One page of the verification queue with its health metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuePage {
    pub items: Vec<SubmittedRecord>,
    pub pagination: Pagination,
    pub queue_depth: QueueDepth,
    pub metrics: QueueMetrics,
}

#[async_trait]
pub trait QueueMetricsApi: Send + Sync {
    /// Metrics over the SUBMITTED records matching `filter`. An empty queue
    /// yields zero-valued metrics.
    async fn queue_metrics(&self, filter: &QueueFilter) -> CoreResult<QueueMetrics>;

    /// Highest priority first, then oldest. `page` is 1-based.
    async fn list_queue(
        &self,
        filter: &QueueFilter,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> CoreResult<QueuePage>;
}
