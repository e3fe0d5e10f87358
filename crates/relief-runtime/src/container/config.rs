//! # Runtime Configuration
//!
//! One struct per component, grouped under [`ReliefConfig`]. Every value has
//! a default; `RELIEF_*` environment variables override them.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `RELIEF_MAX_REVIEW_NOTES_CHARS` | 10000 |
//! | `RELIEF_SCORE_WEIGHT_DELIVERY` | 0.6 |
//! | `RELIEF_SCORE_WEIGHT_VERIFICATION` | 0.4 |
//! | `RELIEF_SCORING_WINDOW` | `all` |
//! | `RELIEF_SCORING_SORT` | `overall` |
//! | `RELIEF_QUEUE_WINDOW_HOURS` | 24 |
//! | `RELIEF_QUEUE_PAGE_LIMIT` | 20 |
//! | `RELIEF_QUEUE_MAX_PAGE_LIMIT` | 100 |
//! | `RELIEF_SEED_PATH` | unset |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use rc_02_verification::VerificationConfig;
use rc_05_donor_scoring::ScoringConfig;
use rc_06_queue_metrics::QueueConfig;
use relief_telemetry::TelemetryConfig;
use shared_types::MILLIS_PER_HOUR;

/// Complete runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct ReliefConfig {
    pub verification: VerificationConfig,
    pub scoring: ScoringConfig,
    pub queue: QueueConfig,
    pub telemetry: TelemetryConfig,
    /// JSON snapshot loaded into the store at startup.
    pub seed_path: Option<PathBuf>,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} has an unparseable value '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid score weights: {0}")]
    InvalidScoreWeights(String),

    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),

    #[error("default page limit {default} exceeds the maximum {max}")]
    PageLimitAboveMax { default: u32, max: u32 },
}

impl ReliefConfig {
    /// Defaults overridden by `RELIEF_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, then validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(v) = parse(&lookup, "RELIEF_MAX_REVIEW_NOTES_CHARS")? {
            config.verification.max_review_notes_chars = v;
        }
        if let Some(v) = parse(&lookup, "RELIEF_SCORE_WEIGHT_DELIVERY")? {
            config.scoring.weights.delivery = v;
        }
        if let Some(v) = parse(&lookup, "RELIEF_SCORE_WEIGHT_VERIFICATION")? {
            config.scoring.weights.verification = v;
        }
        if let Some(v) = parse(&lookup, "RELIEF_SCORING_WINDOW")? {
            config.scoring.default_window = v;
        }
        if let Some(v) = parse(&lookup, "RELIEF_SCORING_SORT")? {
            config.scoring.default_sort = v;
        }
        if let Some(hours) = parse::<u64, _>(&lookup, "RELIEF_QUEUE_WINDOW_HOURS")? {
            config.queue.verification_window_ms = hours.saturating_mul(MILLIS_PER_HOUR);
        }
        if let Some(v) = parse(&lookup, "RELIEF_QUEUE_PAGE_LIMIT")? {
            config.queue.default_page_limit = v;
        }
        if let Some(v) = parse(&lookup, "RELIEF_QUEUE_MAX_PAGE_LIMIT")? {
            config.queue.max_page_limit = v;
        }
        config.seed_path = lookup("RELIEF_SEED_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the services cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring
            .weights
            .validate()
            .map_err(|e| ConfigError::InvalidScoreWeights(e.to_string()))?;
        if self.verification.max_review_notes_chars == 0 {
            return Err(ConfigError::MustBePositive("max_review_notes_chars"));
        }
        if self.queue.verification_window_ms == 0 {
            return Err(ConfigError::MustBePositive("verification_window_ms"));
        }
        if self.queue.default_page_limit == 0 {
            return Err(ConfigError::MustBePositive("default_page_limit"));
        }
        if self.queue.max_page_limit == 0 {
            return Err(ConfigError::MustBePositive("max_page_limit"));
        }
        if self.queue.default_page_limit > self.queue.max_page_limit {
            return Err(ConfigError::PageLimitAboveMax {
                default: self.queue.default_page_limit,
                max: self.queue.max_page_limit,
            });
        }
        Ok(())
    }
}

fn parse<V, F>(lookup: &F, key: &'static str) -> Result<Option<V>, ConfigError>
where
    V: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
