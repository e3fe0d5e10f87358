//! # Queue Metrics Calculator
//!
//! Health of the manual verification queue, computed on demand from the
//! SUBMITTED records in the store.
//!
//! | Metric | Definition |
//! |--------|------------|
//! | `queueDepth` | pending count per priority and in total |
//! | `averageWaitMs` | mean of `now - submittedAt` over pending records |
//! | `oldestPending` | earliest `submittedAt` among pending records |
//! | `verificationRate` | `verified / (verified + rejected)` decided inside the trailing window |
//!
//! An empty queue returns zero-valued metrics, never an error.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    compute_queue_metrics, PageRequest, Pagination, QueueDepth, QueueFilter, QueueMetrics,
};
pub use ports::inbound::{QueueMetricsApi, QueuePage};
pub use service::{QueueConfig, QueueMetricsService};
