//! In-memory implementation of every store port.
//!
//! Each map sits behind its own `parking_lot::RwLock`. No lock is held across
//! an `.await`, and `conditional_update` holds the records write lock for the
//! whole read-compare-write, so concurrent conditional writes against one row
//! serialize and at most one of them applies.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{
    AutoApprovalConfig, Commitment, Donor, DonorId, DonorStanding, Entity, EntityId, Incident,
    IncidentId, RecordId, RecordStatus, SubmittedRecord,
};

use crate::domain::{RecordFilter, StatusUpdate, StoreError};
use crate::ports::outbound::{DonorLedger, EntityStore, IncidentRegistry, RecordStore};

/// In-memory relief store for tests and the demo runtime.
pub struct InMemoryReliefStore {
    records: RwLock<HashMap<RecordId, SubmittedRecord>>,
    entities: RwLock<HashMap<EntityId, Entity>>,
    donors: RwLock<BTreeMap<DonorId, Donor>>,
    commitments: RwLock<Vec<Commitment>>,
    incidents: RwLock<HashMap<IncidentId, Incident>>,
    available: AtomicBool,
    cas_applied: AtomicUsize,
    standing_batches: AtomicUsize,
}

impl Default for InMemoryReliefStore {
    fn default() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            entities: RwLock::new(HashMap::new()),
            donors: RwLock::new(BTreeMap::new()),
            commitments: RwLock::new(Vec::new()),
            incidents: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
            cas_applied: AtomicUsize::new(0),
            standing_batches: AtomicUsize::new(0),
        }
    }
}

impl InMemoryReliefStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: every operation fails with `Unavailable` while false.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of conditional updates that affected a row.
    pub fn cas_applied(&self) -> usize {
        self.cas_applied.load(Ordering::SeqCst)
    }

    /// Number of standings batches written.
    pub fn standing_batches(&self) -> usize {
        self.standing_batches.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable {
                reason: "in-memory store marked unavailable".to_string(),
            })
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryReliefStore {
    async fn insert_record(&self, record: SubmittedRecord) -> Result<(), StoreError> {
        self.check_available()?;
        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(StoreError::DuplicateRecord { id: record.id });
        }
        records.insert(record.id, record);
        Ok(())
    }

    async fn get_record(&self, id: &RecordId) -> Result<Option<SubmittedRecord>, StoreError> {
        self.check_available()?;
        Ok(self.records.read().get(id).cloned())
    }

    async fn list_records(
        &self,
        filter: &RecordFilter,
    ) -> Result<Vec<SubmittedRecord>, StoreError> {
        self.check_available()?;
        let mut matching: Vec<SubmittedRecord> = self
            .records
            .read()
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(matching)
    }

    async fn conditional_update(
        &self,
        id: &RecordId,
        expected: RecordStatus,
        update: StatusUpdate,
    ) -> Result<Option<SubmittedRecord>, StoreError> {
        self.check_available()?;
        let mut records = self.records.write();
        let Some(record) = records.get_mut(id) else {
            return Ok(None);
        };
        if record.status != expected {
            return Ok(None);
        }
        update.apply(record);
        self.cas_applied.fetch_add(1, Ordering::SeqCst);
        Ok(Some(record.clone()))
    }
}

#[async_trait]
impl EntityStore for InMemoryReliefStore {
    async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>, StoreError> {
        self.check_available()?;
        Ok(self.entities.read().get(id).cloned())
    }

    async fn put_entity(&self, entity: Entity) -> Result<(), StoreError> {
        self.check_available()?;
        self.entities.write().insert(entity.id.clone(), entity);
        Ok(())
    }

    async fn list_entities(&self) -> Result<Vec<Entity>, StoreError> {
        self.check_available()?;
        let mut entities: Vec<Entity> = self.entities.read().values().cloned().collect();
        entities.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entities)
    }

    async fn set_auto_approval(
        &self,
        ids: &[EntityId],
        config: AutoApprovalConfig,
    ) -> Result<(), StoreError> {
        self.check_available()?;
        let mut entities = self.entities.write();
        if let Some(missing) = ids.iter().find(|id| !entities.contains_key(*id)) {
            return Err(StoreError::UnknownEntity {
                id: missing.clone(),
            });
        }
        for id in ids {
            if let Some(entity) = entities.get_mut(id) {
                entity.auto_approval = Some(config.clone());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DonorLedger for InMemoryReliefStore {
    async fn list_donors(&self) -> Result<Vec<Donor>, StoreError> {
        self.check_available()?;
        Ok(self.donors.read().values().cloned().collect())
    }

    async fn get_donor(&self, id: &DonorId) -> Result<Option<Donor>, StoreError> {
        self.check_available()?;
        Ok(self.donors.read().get(id).cloned())
    }

    async fn put_donor(&self, donor: Donor) -> Result<(), StoreError> {
        self.check_available()?;
        self.donors.write().insert(donor.id.clone(), donor);
        Ok(())
    }

    async fn put_commitment(&self, commitment: Commitment) -> Result<(), StoreError> {
        self.check_available()?;
        let mut commitments = self.commitments.write();
        match commitments.iter_mut().find(|c| c.id == commitment.id) {
            Some(existing) => *existing = commitment,
            None => commitments.push(commitment),
        }
        Ok(())
    }

    async fn list_commitments(
        &self,
        donor: Option<&DonorId>,
    ) -> Result<Vec<Commitment>, StoreError> {
        self.check_available()?;
        Ok(self
            .commitments
            .read()
            .iter()
            .filter(|c| donor.map_or(true, |d| c.donor_id == *d))
            .cloned()
            .collect())
    }

    async fn apply_standings(&self, standings: Vec<DonorStanding>) -> Result<(), StoreError> {
        self.check_available()?;
        let mut donors = self.donors.write();
        if let Some(missing) = standings.iter().find(|s| !donors.contains_key(&s.donor_id)) {
            return Err(StoreError::UnknownDonor {
                id: missing.donor_id.clone(),
            });
        }
        for standing in standings {
            if let Some(donor) = donors.get_mut(&standing.donor_id) {
                donor.leaderboard_rank = Some(standing.rank);
                donor.score = Some(standing.score);
                donor.self_reported_delivery_rate = standing.self_reported_delivery_rate;
                donor.verified_delivery_rate = standing.verified_delivery_rate;
                donor.ranked_at = Some(standing.ranked_at);
            }
        }
        self.standing_batches.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl IncidentRegistry for InMemoryReliefStore {
    async fn get_incident(&self, id: &IncidentId) -> Result<Option<Incident>, StoreError> {
        self.check_available()?;
        Ok(self.incidents.read().get(id).cloned())
    }

    async fn put_incident(&self, incident: Incident) -> Result<(), StoreError> {
        self.check_available()?;
        self.incidents.write().insert(incident.id.clone(), incident);
        Ok(())
    }
}
