//! Queue Metrics Service - read-only views over pending records.

use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{CoreResult, RecordStatus, SubmittedRecord, TimeSource, MILLIS_PER_DAY};
use tracing::debug;

use rc_01_record_store::RecordFilter;

use crate::domain::{compute_queue_metrics, sort_queue, PageRequest, QueueFilter, QueueMetrics};
use crate::ports::inbound::{QueueMetricsApi, QueuePage};
use crate::ports::outbound::RecordStore;

/// Queue configuration
#[derive(Clone, Debug)]
pub struct QueueConfig {
    /// Trailing window for the verification rate
    pub verification_window_ms: u64,
    pub default_page_limit: u32,
    pub max_page_limit: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            verification_window_ms: MILLIS_PER_DAY,
            default_page_limit: 20,
            max_page_limit: 100,
        }
    }
}

pub struct QueueMetricsService<S, T>
where
    S: RecordStore,
    T: TimeSource,
{
    config: QueueConfig,
    store: Arc<S>,
    time_source: Arc<T>,
}

impl<S, T> QueueMetricsService<S, T>
where
    S: RecordStore,
    T: TimeSource,
{
    pub fn new(config: QueueConfig, store: Arc<S>, time_source: Arc<T>) -> Self {
        Self {
            config,
            store,
            time_source,
        }
    }

    async fn snapshot(
        &self,
        filter: &QueueFilter,
    ) -> CoreResult<(Vec<SubmittedRecord>, QueueMetrics)> {
        let now = self.time_source.now();
        let window = self.config.verification_window_ms;

        let pending = self
            .store
            .list_records(&filter.narrow(RecordFilter::pending()))
            .await?;
        let decided_filter = filter
            .narrow(RecordFilter::new().with_statuses(&[
                RecordStatus::Verified,
                RecordStatus::AutoVerified,
                RecordStatus::Rejected,
            ]))
            .decided_since(now.saturating_sub(window));
        let decided = self.store.list_records(&decided_filter).await?;

        let metrics = compute_queue_metrics(&pending, &decided, now, window);
        debug!(
            depth = metrics.queue_depth.total,
            average_wait_ms = metrics.average_wait_ms,
            "Queue metrics computed"
        );
        Ok((pending, metrics))
    }
}

#[async_trait]
impl<S, T> QueueMetricsApi for QueueMetricsService<S, T>
where
    S: RecordStore + 'static,
    T: TimeSource + 'static,
{
    async fn queue_metrics(&self, filter: &QueueFilter) -> CoreResult<QueueMetrics> {
        let (_, metrics) = self.snapshot(filter).await?;
        Ok(metrics)
    }

    async fn list_queue(
        &self,
        filter: &QueueFilter,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> CoreResult<QueuePage> {
        let request = PageRequest::new(
            page,
            limit,
            self.config.default_page_limit,
            self.config.max_page_limit,
        )?;
        let (mut pending, metrics) = self.snapshot(filter).await?;
        sort_queue(&mut pending);
        let (items, pagination) = request.apply(pending);

        Ok(QueuePage {
            items,
            pagination,
            queue_depth: metrics.queue_depth,
            metrics,
        })
    }
}
