//! # Relief Runtime
//!
//! Demo entry point for the relief verification core.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `RELIEF_*` variables
//! 2. Register metrics and install the log subscriber
//! 3. Build the service container
//! 4. Load the seed snapshot from `RELIEF_SEED_PATH`, if set
//! 5. Report queue health and the donor leaderboard, then dump metrics

use anyhow::{Context, Result};
use tracing::info;

use rc_06_queue_metrics::QueueFilter;
use relief_runtime::{ReliefConfig, ReliefNode, SeedSnapshot};
use relief_telemetry::{encode_metrics, init_telemetry, log_donor_event, log_event};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ReliefConfig::from_env().context("invalid RELIEF_* configuration")?;
    let _telemetry =
        init_telemetry(&config.telemetry).context("failed to initialise telemetry")?;

    info!("===========================================");
    info!("  Relief Verification Core v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let seed_path = config.seed_path.clone();
    let node = ReliefNode::new(config).context("failed to build services")?;

    if let Some(path) = seed_path {
        let snapshot = SeedSnapshot::load(&path)
            .with_context(|| format!("failed to load seed {}", path.display()))?;
        let report = node
            .load_seed(snapshot)
            .await
            .context("failed to apply seed")?;
        log_event!(
            info,
            "runtime",
            "Seed snapshot applied",
            path = %path.display(),
            records = report.records,
            rules_dropped = report.rules_dropped
        );
    }

    let queue = node
        .list_queue(&QueueFilter::default(), None, None)
        .await
        .context("failed to read the verification queue")?;
    log_event!(
        info,
        "queue",
        "Verification queue",
        pending = queue.queue_depth.total,
        critical = queue.queue_depth.critical,
        high = queue.queue_depth.high,
        average_wait_ms = queue.metrics.average_wait_ms,
        verification_rate = queue.metrics.verification_rate
    );

    let leaderboard = node
        .donor_metrics(None, None, None)
        .await
        .context("failed to run the scoring pass")?;
    for card in &leaderboard.donors {
        log_donor_event!(
            info,
            "scoring",
            "Leaderboard",
            card.donor_id,
            rank = card.rank,
            score = card.score,
            trend = ?card.trend
        );
    }

    println!("{}", encode_metrics().context("failed to encode metrics")?);
    Ok(())
}
