//! Domain layer for the Queue Metrics Calculator.

pub mod metrics;
pub mod page;

pub use metrics::{compute_queue_metrics, QueueDepth, QueueMetrics};
pub use page::{sort_queue, PageRequest, Pagination, QueueFilter};
