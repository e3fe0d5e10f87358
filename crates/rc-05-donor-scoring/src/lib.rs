//! # Donor Scoring Engine
//!
//! **Component:** Donor Scoring Engine
//!
//! ## Purpose
//!
//! Measures how reliably each donor delivers and how often their field
//! responses verify, turns that into a 0 to 100 score and badges, ranks all
//! donors, and writes the standings back to the donor ledger.
//!
//! ## Functional Core / Imperative Shell
//!
//! | Layer | Location | Touches the store |
//! |-------|----------|-------------------|
//! | metrics, score, badges, ranking, trend | `domain/` | no |
//! | read, then one batched `apply_standings` | `service.rs` | yes |
//!
//! ## Metrics
//!
//! ```text
//! fulfillmentRate       = COMPLETE commitments / commitments
//! verifiedDeliveryRate  = Σ verified quantity / Σ committed quantity
//! verificationRate      = (VERIFIED + AUTO_VERIFIED) responses / responses
//! overallSuccessRate    = (fulfilled + verified) / (commitments + responses)
//! score                 = 100 × (0.6·verifiedDeliveryRate + 0.4·verificationRate)
//! ```
//!
//! ## Concurrency
//!
//! Scoring passes are serialized by a `tokio::sync::Mutex` held from the
//! first read to the write-back, so two passes never rank from interleaved
//! reads.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    award_badges, composite_score, donor_metrics, rank_scorecards, Badge, BadgeCategory,
    BadgeTier, DonorMetrics, DonorScorecard, ScoreWeights, SortKey, TimeWindow, Trend,
};
pub use ports::inbound::{DonorLeaderboard, DonorScoringApi, ScoringQuery};
pub use service::{DonorScoringService, ScoringConfig};
