//! Prometheus metrics for the relief verification core.
//!
//! All metrics follow the naming convention: `relief_<component>_<metric>_<unit>`
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `relief_records_submitted_total` | counter | `kind`, `status` |
//! | `relief_verification_transitions_total` | counter | `action`, `outcome` |
//! | `relief_verification_state_conflicts_total` | counter | |
//! | `relief_auto_approval_decisions_total` | counter | `outcome` |
//! | `relief_queue_depth` | gauge | `priority` |
//! | `relief_scoring_passes_total` | counter | `outcome` |
//! | `relief_scoring_pass_duration_seconds` | histogram | |
//! | `relief_errors_total` | counter | `component`, `code` |

use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, GaugeVec, Histogram, HistogramOpts, Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // VERIFICATION
    // =========================================================================

    /// Records accepted, by kind and the status they landed in
    pub static ref RECORDS_SUBMITTED: CounterVec = CounterVec::new(
        Opts::new("relief_records_submitted_total", "Records accepted by submit"),
        &["kind", "status"]
    ).expect("metric creation failed");

    /// Lifecycle transitions attempted, by action and outcome code
    pub static ref TRANSITIONS: CounterVec = CounterVec::new(
        Opts::new(
            "relief_verification_transitions_total",
            "Lifecycle transitions by action and outcome"
        ),
        &["action", "outcome"]
    ).expect("metric creation failed");

    /// Conditional writes lost to a concurrent decision
    pub static ref STATE_CONFLICTS: Counter = Counter::new(
        "relief_verification_state_conflicts_total",
        "Transitions rejected because another decision committed first"
    ).expect("metric creation failed");

    // =========================================================================
    // AUTO-APPROVAL
    // =========================================================================

    pub static ref AUTO_APPROVAL_DECISIONS: CounterVec = CounterVec::new(
        Opts::new(
            "relief_auto_approval_decisions_total",
            "Auto-approval evaluations by outcome"
        ),
        &["outcome"]
    ).expect("metric creation failed");

    // =========================================================================
    // QUEUE
    // =========================================================================

    /// Pending records per priority, refreshed on every queue read
    pub static ref QUEUE_DEPTH: GaugeVec = GaugeVec::new(
        Opts::new("relief_queue_depth", "Pending records by priority"),
        &["priority"]
    ).expect("metric creation failed");

    // =========================================================================
    // DONOR SCORING
    // =========================================================================

    pub static ref SCORING_PASSES: CounterVec = CounterVec::new(
        Opts::new("relief_scoring_passes_total", "Donor scoring passes by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    pub static ref SCORING_PASS_DURATION: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            "relief_scoring_pass_duration_seconds",
            "Wall time of one read-score-write scoring pass"
        ).buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0])
    ).expect("metric creation failed");

    // =========================================================================
    // ERRORS
    // =========================================================================

    /// Errors returned to callers, by component and machine code
    pub static ref ERRORS: CounterVec = CounterVec::new(
        Opts::new("relief_errors_total", "Errors by component and code"),
        &["component", "code"]
    ).expect("metric creation failed");
}

/// Handle proving the collectors are registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    pub registered: usize,
}

/// Register all metrics with the global registry. Calling it again is a
/// no-op for collectors that are already registered.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(RECORDS_SUBMITTED.clone()),
        Box::new(TRANSITIONS.clone()),
        Box::new(STATE_CONFLICTS.clone()),
        Box::new(AUTO_APPROVAL_DECISIONS.clone()),
        Box::new(QUEUE_DEPTH.clone()),
        Box::new(SCORING_PASSES.clone()),
        Box::new(SCORING_PASS_DURATION.clone()),
        Box::new(ERRORS.clone()),
    ];

    let mut registered = 0;
    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) => registered += 1,
            Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { registered })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
