//! # Seed Snapshot
//!
//! Startup data for the in-memory store, read from one JSON document:
//!
//! ```json
//! {
//!   "entities":    [{ "id": "...", "name": "...", "entityType": "...", "autoApproval": {...} }],
//!   "donors":      [...],
//!   "commitments": [...],
//!   "incidents":   [...],
//!   "records":     [...]
//! }
//! ```
//!
//! Entities stay raw until they pass through `decode_entity`, so a stale or
//! malformed `autoApproval` section loads as "no rule" instead of failing
//! the whole seed.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use shared_types::{Commitment, Donor, Incident, SubmittedRecord};
use thiserror::Error;
use tracing::{info, warn};

use rc_01_record_store::{DonorLedger, EntityStore, IncidentRegistry, RecordStore, StoreError};
use rc_03_auto_approval::decode_entity;

/// Seed loading errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entity #{index} in the seed is malformed: {source}")]
    Entity {
        index: usize,
        source: serde_json::Error,
    },

    #[error("store rejected seed data: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedSnapshot {
    #[serde(default)]
    pub entities: Vec<Value>,
    #[serde(default)]
    pub donors: Vec<Donor>,
    #[serde(default)]
    pub commitments: Vec<Commitment>,
    #[serde(default)]
    pub incidents: Vec<Incident>,
    #[serde(default)]
    pub records: Vec<SubmittedRecord>,
}

impl SeedSnapshot {
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// What a seed put into the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub entities: usize,
    /// Entities that loaded without a usable auto-approval rule although
    /// their document carried one.
    pub rules_dropped: usize,
    pub donors: usize,
    pub commitments: usize,
    pub incidents: usize,
    pub records: usize,
}

/// Write a snapshot into the store. Entities first, so records referencing
/// them land on known ids.
pub async fn apply_seed<S>(store: &S, snapshot: SeedSnapshot) -> Result<SeedReport, SeedError>
where
    S: RecordStore + EntityStore + DonorLedger + IncidentRegistry,
{
    let mut report = SeedReport::default();

    for (index, raw) in snapshot.entities.iter().enumerate() {
        let entity = decode_entity(raw).map_err(|source| SeedError::Entity { index, source })?;
        let carried_rule = raw.get(shared_types::AUTO_APPROVAL_FIELD).is_some();
        if carried_rule && entity.auto_approval.is_none() {
            warn!(entity_id = %entity.id, "Seed entity has an unreadable auto-approval rule; loaded without one");
            report.rules_dropped += 1;
        }
        store.put_entity(entity).await?;
        report.entities += 1;
    }
    for incident in snapshot.incidents {
        store.put_incident(incident).await?;
        report.incidents += 1;
    }
    for donor in snapshot.donors {
        store.put_donor(donor).await?;
        report.donors += 1;
    }
    for commitment in snapshot.commitments {
        store.put_commitment(commitment).await?;
        report.commitments += 1;
    }
    for record in snapshot.records {
        store.insert_record(record).await?;
        report.records += 1;
    }

    info!(
        entities = report.entities,
        rules_dropped = report.rules_dropped,
        donors = report.donors,
        commitments = report.commitments,
        incidents = report.incidents,
        records = report.records,
        "Seed applied"
    );
    Ok(report)
}
