//! Queue ordering, filters, and pagination.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use shared_types::{
    CoreError, CoreResult, EntityId, Priority, RecordKind, RecordType, SubmittedRecord,
};

use rc_01_record_store::RecordFilter;

/// Optional narrowing of the pending queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueFilter {
    #[serde(default)]
    pub kind: Option<RecordKind>,
    #[serde(default)]
    pub entity_id: Option<EntityId>,
    #[serde(default)]
    pub record_type: Option<RecordType>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl QueueFilter {
    /// Apply the narrowing fields to a store filter.
    pub fn narrow(&self, mut filter: RecordFilter) -> RecordFilter {
        filter.kind = self.kind;
        filter.entity_id = self.entity_id.clone();
        filter.record_type = self.record_type;
        filter.priority = self.priority;
        filter
    }
}

/// Highest priority first, then longest waiting, then id.
pub fn sort_queue(records: &mut [SubmittedRecord]) {
    records.sort_by_key(|r| (Reverse(r.priority), r.queued_since(), r.id));
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Fill defaults and enforce `page ≥ 1` and `1 ≤ limit ≤ max_limit`.
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
        max_limit: u32,
    ) -> CoreResult<Self> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(default_limit);
        if page == 0 {
            return Err(CoreError::validation("page", "page numbers start at 1"));
        }
        if limit == 0 || limit > max_limit {
            return Err(CoreError::validation(
                "limit",
                format!("limit must be between 1 and {}", max_limit),
            ));
        }
        Ok(Self { page, limit })
    }

    /// Slice one page out of `items`. Pages past the end are empty.
    pub fn apply<T>(&self, items: Vec<T>) -> (Vec<T>, Pagination) {
        let total = items.len() as u64;
        let limit = u64::from(self.limit);
        let total_pages = total.div_ceil(limit);
        let skip = (u64::from(self.page) - 1).saturating_mul(limit);
        let page_items = items
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(self.limit as usize)
            .collect();
        (
            page_items,
            Pagination {
                page: self.page,
                limit: self.limit,
                total,
                total_pages,
            },
        )
    }
}
