//! Record query predicate.

use shared_types::{
    DonorId, EntityId, IncidentId, Priority, RecordKind, RecordStatus, RecordType,
    SubmittedRecord, Timestamp,
};

/// Selects records by any combination of fields. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub statuses: Option<Vec<RecordStatus>>,
    pub kind: Option<RecordKind>,
    pub entity_id: Option<EntityId>,
    pub donor_id: Option<DonorId>,
    pub incident_id: Option<IncidentId>,
    pub record_type: Option<RecordType>,
    pub priority: Option<Priority>,
    /// Only records whose terminal decision happened at or after this time.
    pub decided_since: Option<Timestamp>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records waiting in the verification queue.
    pub fn pending() -> Self {
        Self::new().with_statuses(&[RecordStatus::Submitted])
    }

    pub fn with_statuses(mut self, statuses: &[RecordStatus]) -> Self {
        self.statuses = Some(statuses.to_vec());
        self
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_entity(mut self, entity_id: EntityId) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_donor(mut self, donor_id: DonorId) -> Self {
        self.donor_id = Some(donor_id);
        self
    }

    pub fn with_incident(mut self, incident_id: IncidentId) -> Self {
        self.incident_id = Some(incident_id);
        self
    }

    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = Some(record_type);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn decided_since(mut self, since: Timestamp) -> Self {
        self.decided_since = Some(since);
        self
    }

    pub fn matches(&self, record: &SubmittedRecord) -> bool {
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&record.status) {
                return false;
            }
        }
        if self.kind.is_some_and(|kind| kind != record.kind) {
            return false;
        }
        if self
            .entity_id
            .as_ref()
            .is_some_and(|id| *id != record.entity_id)
        {
            return false;
        }
        if let Some(donor_id) = &self.donor_id {
            if record.donor_id.as_ref() != Some(donor_id) {
                return false;
            }
        }
        if let Some(incident_id) = &self.incident_id {
            if record.incident_id.as_ref() != Some(incident_id) {
                return false;
            }
        }
        if self.record_type.is_some_and(|t| t != record.record_type) {
            return false;
        }
        if self.priority.is_some_and(|p| p != record.priority) {
            return false;
        }
        if let Some(since) = self.decided_since {
            match record.decided_at() {
                Some(at) if at >= since => {}
                _ => return false,
            }
        }
        true
    }
}
