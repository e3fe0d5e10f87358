//! Functional core of the Donor Scoring Engine. Nothing here touches a store.

pub mod badges;
pub mod metrics;
pub mod ranking;
pub mod score;
pub mod window;

pub use badges::{award_badges, Badge, BadgeCategory, BadgeTier};
pub use metrics::{
    commitment_metrics, donor_metrics, response_metrics, CombinedMetrics, CommitmentMetrics,
    DonorMetrics, ResponseMetrics,
};
pub use ranking::{rank_scorecards, trend, DonorScorecard, SortKey, Trend};
pub use score::{composite_score, ScoreWeights};
pub use window::TimeWindow;
