//! Queue health over the pending set.

use serde::{Deserialize, Serialize};
use shared_types::{Priority, RecordStatus, SubmittedRecord, Timestamp};

/// Pending records per priority bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueDepth {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
    pub total: u64,
}

impl QueueDepth {
    pub fn from_records(pending: &[SubmittedRecord]) -> Self {
        let mut depth = Self::default();
        for record in pending {
            match record.priority {
                Priority::Low => depth.low += 1,
                Priority::Medium => depth.medium += 1,
                Priority::High => depth.high += 1,
                Priority::Critical => depth.critical += 1,
            }
            depth.total += 1;
        }
        depth
    }

    pub fn get(&self, priority: Priority) -> u64 {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Critical => self.critical,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMetrics {
    pub queue_depth: QueueDepth,
    pub average_wait_ms: u64,
    /// When the longest-waiting record entered the queue.
    pub oldest_pending: Option<Timestamp>,
    pub verified_in_window: u64,
    pub rejected_in_window: u64,
    /// `verified / (verified + rejected)` over the trailing window, 0 when
    /// nothing was decided.
    pub verification_rate: f64,
    pub window_ms: u64,
}

/// Compute metrics from the pending set and the records decided inside the
/// window. Records outside the window in `decided` are ignored.
pub fn compute_queue_metrics(
    pending: &[SubmittedRecord],
    decided: &[SubmittedRecord],
    now: Timestamp,
    window_ms: u64,
) -> QueueMetrics {
    let queue_depth = QueueDepth::from_records(pending);

    let average_wait_ms = if pending.is_empty() {
        0
    } else {
        let total_wait: u128 = pending
            .iter()
            .map(|r| u128::from(now.saturating_sub(r.queued_since())))
            .sum();
        u64::try_from(total_wait / pending.len() as u128).unwrap_or(u64::MAX)
    };
    let oldest_pending = pending.iter().map(SubmittedRecord::queued_since).min();

    let since = now.saturating_sub(window_ms);
    let (mut verified_in_window, mut rejected_in_window) = (0_u64, 0_u64);
    for record in decided {
        if !record.decided_at().is_some_and(|at| at >= since) {
            continue;
        }
        match record.status {
            RecordStatus::Verified | RecordStatus::AutoVerified => verified_in_window += 1,
            RecordStatus::Rejected => rejected_in_window += 1,
            _ => {}
        }
    }
    let decisions = verified_in_window + rejected_in_window;
    let verification_rate = if decisions == 0 {
        0.0
    } else {
        verified_in_window as f64 / decisions as f64
    };

    QueueMetrics {
        queue_depth,
        average_wait_ms,
        oldest_pending,
        verified_in_window,
        rejected_in_window,
        verification_rate,
        window_ms,
    }
}
