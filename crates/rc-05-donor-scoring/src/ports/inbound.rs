//! Driving Ports (API - Inbound)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{CoreResult, DonorId, Timestamp};

use crate::domain::{DonorScorecard, SortKey, TimeWindow};

/// Window and ordering of one scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringQuery {
    pub window: TimeWindow,
    pub sort: SortKey,
}

impl ScoringQuery {
    /// All-time composite ranking; the only pass that writes standings.
    pub fn is_canonical(&self) -> bool {
        self.window == TimeWindow::All && self.sort == SortKey::Overall
    }
}

/// Result of `donor_metrics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorLeaderboard {
    pub donors: Vec<DonorScorecard>,
    pub window: TimeWindow,
    pub sort: SortKey,
    pub generated_at: Timestamp,
}

#[async_trait]
pub trait DonorScoringApi: Send + Sync {
    /// Score and rank every donor. A canonical query persists all standings
    /// in one batch; any other query ranks in memory only.
    ///
    /// Passes never overlap; a second caller waits for the first to finish.
    async fn run_scoring_pass(&self, query: ScoringQuery) -> CoreResult<Vec<DonorScorecard>>;

    /// Run a pass and return the whole leaderboard, or only `donor_id`'s row.
    async fn donor_metrics(
        &self,
        donor_id: Option<&DonorId>,
        query: ScoringQuery,
    ) -> CoreResult<DonorLeaderboard>;
}
