//! Composite score.

use serde::{Deserialize, Serialize};
use shared_types::{CoreError, CoreResult};

use super::metrics::DonorMetrics;

/// Relative weight of each rate in the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreWeights {
    pub delivery: f64,
    pub verification: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            delivery: 0.6,
            verification: 0.4,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> CoreResult<()> {
        let finite = self.delivery.is_finite() && self.verification.is_finite();
        if !finite || self.delivery < 0.0 || self.verification < 0.0 {
            return Err(CoreError::validation(
                "scoreWeights",
                "weights must be finite and non-negative",
            ));
        }
        if self.delivery + self.verification <= 0.0 {
            return Err(CoreError::validation(
                "scoreWeights",
                "weights must sum to a positive value",
            ));
        }
        Ok(())
    }
}

/// `100 × weighted mean of verified delivery rate and verification rate`,
/// clamped to `[0, 100]`.
pub fn composite_score(metrics: &DonorMetrics, weights: &ScoreWeights) -> f64 {
    let total = weights.delivery + weights.verification;
    if total <= 0.0 {
        return 0.0;
    }
    let blended = weights.delivery * metrics.commitments.verified_delivery_rate
        + weights.verification * metrics.responses.verification_rate;
    (100.0 * blended / total).clamp(0.0, 100.0)
}
