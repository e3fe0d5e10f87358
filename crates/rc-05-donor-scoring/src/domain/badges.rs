//! Badge ladders.
//!
//! | Category | Measure | Gold | Silver | Bronze |
//! |----------|---------|------|--------|--------|
//! | DELIVERY_RELIABILITY | verified delivery rate (%) | ≥95 | ≥85 | ≥70 |
//! | VERIFICATION_EXCELLENCE | verification rate (%) | ≥95 | ≥85 | ≥70 |
//! | ACTIVITY_VOLUME | total activities | ≥100 | ≥50 | ≥10 |
//!
//! Categories are independent. A category with nothing to measure awards
//! nothing.

use serde::{Deserialize, Serialize};

use super::metrics::DonorMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeCategory {
    DeliveryReliability,
    VerificationExcellence,
    ActivityVolume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BadgeTier {
    Bronze,
    Silver,
    Gold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Badge {
    pub category: BadgeCategory,
    pub tier: BadgeTier,
}

const RATE_LADDER: [(f64, BadgeTier); 3] = [
    (95.0, BadgeTier::Gold),
    (85.0, BadgeTier::Silver),
    (70.0, BadgeTier::Bronze),
];

const VOLUME_LADDER: [(f64, BadgeTier); 3] = [
    (100.0, BadgeTier::Gold),
    (50.0, BadgeTier::Silver),
    (10.0, BadgeTier::Bronze),
];

fn climb(value: f64, ladder: &[(f64, BadgeTier)]) -> Option<BadgeTier> {
    ladder
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, tier)| *tier)
}

pub fn award_badges(metrics: &DonorMetrics) -> Vec<Badge> {
    let mut badges = Vec::new();
    let mut award = |category, tier: Option<BadgeTier>| {
        if let Some(tier) = tier {
            badges.push(Badge { category, tier });
        }
    };

    if metrics.commitments.committed_quantity > 0.0 {
        award(
            BadgeCategory::DeliveryReliability,
            climb(metrics.commitments.verified_delivery_rate * 100.0, &RATE_LADDER),
        );
    }
    if metrics.responses.total > 0 {
        award(
            BadgeCategory::VerificationExcellence,
            climb(metrics.responses.verification_rate * 100.0, &RATE_LADDER),
        );
    }
    award(
        BadgeCategory::ActivityVolume,
        climb(metrics.combined.total_activities as f64, &VOLUME_LADDER),
    );
    badges
}
