//! # Relief Telemetry
//!
//! Logging and metrics bootstrap for the relief verification core.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` registry with an `EnvFilter` and a
//!   pretty or JSON `fmt` layer
//! - **Metrics**: Prometheus collectors in a crate-local registry, exposed
//!   through [`encode_metrics`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use relief_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `RELIEF_SERVICE_NAME` | `relief-core` | Service name on startup lines |
//! | `RELIEF_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `RELIEF_JSON_LOGS` | `false` | JSON output (defaults on in containers) |
//! | `RELIEF_CONSOLE_OUTPUT` | `true` | Write log lines to stdout |

mod config;
mod logging;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, AUTO_APPROVAL_DECISIONS,
    ERRORS, QUEUE_DEPTH, RECORDS_SUBMITTED, SCORING_PASSES, SCORING_PASS_DURATION,
    STATE_CONFLICTS, TRANSITIONS,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("failed to install tracing subscriber: {0}")]
    TracerInit(String),

    #[error("failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("invalid telemetry configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global subscriber.
///
/// Hold the returned guard for the lifetime of the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so the startup line below is already counted against a
    // live registry.
    let metrics = register_metrics()?;
    init_tracing(config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
        metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
    metrics: MetricsHandle,
}

impl TelemetryGuard {
    pub fn metrics(&self) -> MetricsHandle {
        self.metrics
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "shutting down telemetry");
    }
}
