//! # Outbound Ports (Driven Ports)
//!
//! Storage interfaces the verification core requires the host application to
//! implement.
//!
//! Production: a transactional database adapter.
//! Testing: `InMemoryReliefStore` (adapters/memory.rs)

use async_trait::async_trait;
use shared_types::{
    AutoApprovalConfig, Commitment, Donor, DonorId, DonorStanding, Entity, EntityId, Incident,
    IncidentId, RecordId, RecordStatus, SubmittedRecord,
};

use crate::domain::{RecordFilter, StatusUpdate, StoreError};

/// Submitted records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a new record. Fails with `DuplicateRecord` if the id exists.
    async fn insert_record(&self, record: SubmittedRecord) -> Result<(), StoreError>;

    /// Fetch a record by id.
    async fn get_record(&self, id: &RecordId) -> Result<Option<SubmittedRecord>, StoreError>;

    /// All records matching `filter`, ordered by `createdAt` then id.
    async fn list_records(&self, filter: &RecordFilter)
        -> Result<Vec<SubmittedRecord>, StoreError>;

    /// Atomic compare-and-set on the record's status.
    ///
    /// Applies `update` only if the record exists and its status equals
    /// `expected`; the check and the write are one atomic step.
    ///
    /// # Returns
    /// - `Ok(Some(record))`: one row affected, the updated record
    /// - `Ok(None)`: zero rows affected
    async fn conditional_update(
        &self,
        id: &RecordId,
        expected: RecordStatus,
        update: StatusUpdate,
    ) -> Result<Option<SubmittedRecord>, StoreError>;
}

/// Facilities/locations and their auto-approval configuration.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_entity(&self, id: &EntityId) -> Result<Option<Entity>, StoreError>;

    async fn put_entity(&self, entity: Entity) -> Result<(), StoreError>;

    async fn list_entities(&self) -> Result<Vec<Entity>, StoreError>;

    /// Write `config` to every listed entity in one transaction.
    ///
    /// Any unknown id aborts the whole write with `UnknownEntity`.
    async fn set_auto_approval(
        &self,
        ids: &[EntityId],
        config: AutoApprovalConfig,
    ) -> Result<(), StoreError>;
}

/// Donors and their commitments.
#[async_trait]
pub trait DonorLedger: Send + Sync {
    async fn list_donors(&self) -> Result<Vec<Donor>, StoreError>;

    async fn get_donor(&self, id: &DonorId) -> Result<Option<Donor>, StoreError>;

    async fn put_donor(&self, donor: Donor) -> Result<(), StoreError>;

    async fn put_commitment(&self, commitment: Commitment) -> Result<(), StoreError>;

    /// Commitments for one donor, or all when `donor` is `None`.
    async fn list_commitments(&self, donor: Option<&DonorId>)
        -> Result<Vec<Commitment>, StoreError>;

    /// Persist ranks and rates for many donors in one batch.
    ///
    /// Any unknown donor aborts the whole batch with `UnknownDonor`.
    async fn apply_standings(&self, standings: Vec<DonorStanding>) -> Result<(), StoreError>;
}

/// Disaster incidents.
#[async_trait]
pub trait IncidentRegistry: Send + Sync {
    async fn get_incident(&self, id: &IncidentId) -> Result<Option<Incident>, StoreError>;

    async fn put_incident(&self, incident: Incident) -> Result<(), StoreError>;
}
