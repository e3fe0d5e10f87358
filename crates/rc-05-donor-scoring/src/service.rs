//! Donor Scoring Service - the imperative shell around the scoring core.
//!
//! ```text
//! lock pass ──→ read donors, commitments, responses ──→ score + rank (pure)
//!                                                          │
//!            canonical? apply_standings (one batch) ←──────┤
//!            otherwise  remember ranks for this query ←────┘ ──→ unlock
//! ```
//!
//! Only the canonical pass (`overall` over `all`) writes standings back, so
//! the donor ledger always holds all-time figures and its rank is the
//! baseline for canonical trends. Other queries compare against the previous
//! pass with the same window and sort.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    Commitment, CoreError, CoreResult, DonorId, DonorStanding, RecordKind, SubmittedRecord,
    TimeSource,
};
use tokio::sync::Mutex;
use tracing::{debug, info};

use rc_01_record_store::RecordFilter;

use crate::domain::{
    award_badges, composite_score, donor_metrics, rank_scorecards, DonorScorecard, ScoreWeights,
    SortKey, TimeWindow, Trend,
};
use crate::ports::inbound::{DonorLeaderboard, DonorScoringApi, ScoringQuery};
use crate::ports::outbound::{DonorLedger, RecordStore};

/// Scoring configuration
#[derive(Clone, Debug, Default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    /// Window used when a caller does not name one
    pub default_window: TimeWindow,
    /// Sort used when a caller does not name one
    pub default_sort: SortKey,
}

impl ScoringConfig {
    /// Fill the unset parts of a request from the defaults.
    pub fn query(&self, window: Option<TimeWindow>, sort: Option<SortKey>) -> ScoringQuery {
        ScoringQuery {
            window: window.unwrap_or(self.default_window),
            sort: sort.unwrap_or(self.default_sort),
        }
    }
}

pub struct DonorScoringService<L, T>
where
    L: DonorLedger + RecordStore,
    T: TimeSource,
{
    config: ScoringConfig,
    ledger: Arc<L>,
    time_source: Arc<T>,
    /// Held for a whole read-compute-write pass. Holds the last ranks of
    /// every non-canonical query.
    pass_lock: Mutex<HashMap<ScoringQuery, HashMap<DonorId, u32>>>,
}

impl<L, T> DonorScoringService<L, T>
where
    L: DonorLedger + RecordStore,
    T: TimeSource,
{
    pub fn new(config: ScoringConfig, ledger: Arc<L>, time_source: Arc<T>) -> CoreResult<Self> {
        config.weights.validate()?;
        Ok(Self {
            config,
            ledger,
            time_source,
            pass_lock: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }
}

#[async_trait]
impl<L, T> DonorScoringApi for DonorScoringService<L, T>
where
    L: DonorLedger + RecordStore + 'static,
    T: TimeSource + 'static,
{
    async fn run_scoring_pass(&self, query: ScoringQuery) -> CoreResult<Vec<DonorScorecard>> {
        let mut previous_ranks = self.pass_lock.lock().await;
        let canonical = query.is_canonical();
        let now = self.time_source.now();

        let donors = self.ledger.list_donors().await?;
        let commitments = self.ledger.list_commitments(None).await?;
        let responses = self
            .ledger
            .list_records(&RecordFilter::new().with_kind(RecordKind::Response))
            .await?;

        let mut commitments_by_donor: HashMap<&DonorId, Vec<&Commitment>> = HashMap::new();
        for c in commitments
            .iter()
            .filter(|c| query.window.contains(c.created_at, now))
        {
            commitments_by_donor.entry(&c.donor_id).or_default().push(c);
        }
        let mut responses_by_donor: HashMap<&DonorId, Vec<&SubmittedRecord>> = HashMap::new();
        for r in responses
            .iter()
            .filter(|r| query.window.contains(r.created_at, now))
        {
            if let Some(donor_id) = &r.donor_id {
                responses_by_donor.entry(donor_id).or_default().push(r);
            }
        }

        let cards: Vec<DonorScorecard> = donors
            .iter()
            .map(|donor| {
                let metrics = donor_metrics(
                    commitments_by_donor
                        .get(&donor.id)
                        .into_iter()
                        .flatten()
                        .copied(),
                    responses_by_donor
                        .get(&donor.id)
                        .into_iter()
                        .flatten()
                        .copied(),
                );
                let score = composite_score(&metrics, &self.config.weights);
                DonorScorecard {
                    donor_id: donor.id.clone(),
                    name: donor.name.clone(),
                    badges: award_badges(&metrics),
                    metrics,
                    score,
                    rank: 0,
                    previous_rank: if canonical {
                        donor.leaderboard_rank
                    } else {
                        previous_ranks
                            .get(&query)
                            .and_then(|ranks| ranks.get(&donor.id))
                            .copied()
                    },
                    trend: Trend::New,
                }
            })
            .collect();
        let ranked = rank_scorecards(cards, query.sort);

        if !canonical {
            previous_ranks.insert(
                query,
                ranked
                    .iter()
                    .map(|card| (card.donor_id.clone(), card.rank))
                    .collect(),
            );
            debug!(
                donors = ranked.len(),
                window = %query.window,
                sort = %query.sort,
                "Scoring pass ranked in memory"
            );
            return Ok(ranked);
        }

        let standings: Vec<DonorStanding> = ranked
            .iter()
            .map(|card| DonorStanding {
                donor_id: card.donor_id.clone(),
                rank: card.rank,
                score: card.score,
                self_reported_delivery_rate: card.metrics.commitments.self_reported_delivery_rate,
                verified_delivery_rate: card.metrics.commitments.verified_delivery_rate,
                ranked_at: now,
            })
            .collect();
        self.ledger.apply_standings(standings).await?;

        info!(donors = ranked.len(), "Canonical standings persisted");
        Ok(ranked)
    }

    async fn donor_metrics(
        &self,
        donor_id: Option<&DonorId>,
        query: ScoringQuery,
    ) -> CoreResult<DonorLeaderboard> {
        if let Some(id) = donor_id {
            if self.ledger.get_donor(id).await?.is_none() {
                return Err(CoreError::not_found("donor", id));
            }
        }

        let mut donors = self.run_scoring_pass(query).await?;
        if let Some(id) = donor_id {
            donors.retain(|card| &card.donor_id == id);
            debug!(donor_id = %id, found = !donors.is_empty(), "Single donor requested");
        }

        Ok(DonorLeaderboard {
            donors,
            window: query.window,
            sort: query.sort,
            generated_at: self.time_source.now(),
        })
    }
}
