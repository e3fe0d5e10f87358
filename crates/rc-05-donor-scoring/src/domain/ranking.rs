//! Leaderboard ordering and rank trends.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use shared_types::{CoreError, DonorId};

use super::badges::Badge;
use super::metrics::DonorMetrics;

/// Leaderboard sort key. Every key sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Composite score.
    #[default]
    Overall,
    /// Verified delivery rate.
    DeliveryRate,
    FulfillmentRate,
    VerificationRate,
    /// Total activities.
    Activity,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Overall => "overall",
            SortKey::DeliveryRate => "delivery_rate",
            SortKey::FulfillmentRate => "fulfillment_rate",
            SortKey::VerificationRate => "verification_rate",
            SortKey::Activity => "activity",
        }
    }

    fn value(&self, card: &DonorScorecard) -> f64 {
        let m = &card.metrics;
        match self {
            SortKey::Overall => card.score,
            SortKey::DeliveryRate => m.commitments.verified_delivery_rate,
            SortKey::FulfillmentRate => m.commitments.fulfillment_rate,
            SortKey::VerificationRate => m.responses.verification_rate,
            SortKey::Activity => m.combined.total_activities as f64,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [
            SortKey::Overall,
            SortKey::DeliveryRate,
            SortKey::FulfillmentRate,
            SortKey::VerificationRate,
            SortKey::Activity,
        ]
        .into_iter()
        .find(|key| key.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CoreError::validation("sortBy", format!("unknown sort key '{s}'")))
    }
}

/// Rank movement since the previous scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
    New,
}

pub fn trend(previous: Option<u32>, current: u32) -> Trend {
    match previous {
        None => Trend::New,
        Some(prev) => match current.cmp(&prev) {
            Ordering::Less => Trend::Up,
            Ordering::Greater => Trend::Down,
            Ordering::Equal => Trend::Stable,
        },
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorScorecard {
    pub donor_id: DonorId,
    pub name: String,
    pub metrics: DonorMetrics,
    pub score: f64,
    pub badges: Vec<Badge>,
    /// 1-based; 0 until ranked.
    pub rank: u32,
    pub previous_rank: Option<u32>,
    pub trend: Trend,
}

/// Sort descending by `key`, ties by donor id, then assign ranks and trends.
pub fn rank_scorecards(mut cards: Vec<DonorScorecard>, key: SortKey) -> Vec<DonorScorecard> {
    cards.sort_by(|a, b| {
        key.value(b)
            .total_cmp(&key.value(a))
            .then_with(|| a.donor_id.cmp(&b.donor_id))
    });
    for (position, card) in cards.iter_mut().enumerate() {
        card.rank = u32::try_from(position + 1).unwrap_or(u32::MAX);
        card.trend = trend(card.previous_rank, card.rank);
    }
    cards
}
