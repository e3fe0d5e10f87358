//! Per-donor activity metrics.
//!
//! All rates are fractions in `[0, 1]` and are 0 when their denominator is 0.

use serde::{Deserialize, Serialize};
use shared_types::{Commitment, CommitmentStatus, SubmittedRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitmentMetrics {
    pub total: u64,
    pub fulfilled: u64,
    pub fulfillment_rate: f64,
    pub committed_quantity: f64,
    pub delivered_quantity: f64,
    pub verified_quantity: f64,
    pub self_reported_delivery_rate: f64,
    pub verified_delivery_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetrics {
    pub total: u64,
    pub verified: u64,
    pub verification_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedMetrics {
    pub total_activities: u64,
    pub verified_activities: u64,
    pub overall_success_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorMetrics {
    pub commitments: CommitmentMetrics,
    pub responses: ResponseMetrics,
    pub combined: CombinedMetrics,
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        (numerator / denominator).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn commitment_metrics<'a>(
    commitments: impl IntoIterator<Item = &'a Commitment>,
) -> CommitmentMetrics {
    let mut m = CommitmentMetrics::default();
    for c in commitments {
        m.total += 1;
        if c.status == CommitmentStatus::Complete {
            m.fulfilled += 1;
        }
        m.committed_quantity += c.committed_quantity.max(0.0);
        m.delivered_quantity += c.delivered_quantity.max(0.0);
        m.verified_quantity += c.verified_delivery_quantity.max(0.0);
    }
    m.fulfillment_rate = ratio(m.fulfilled as f64, m.total as f64);
    m.self_reported_delivery_rate = ratio(m.delivered_quantity, m.committed_quantity);
    m.verified_delivery_rate = ratio(m.verified_quantity, m.committed_quantity);
    m
}

pub fn response_metrics<'a>(
    responses: impl IntoIterator<Item = &'a SubmittedRecord>,
) -> ResponseMetrics {
    let mut m = ResponseMetrics::default();
    for r in responses {
        m.total += 1;
        if r.status.is_verified() {
            m.verified += 1;
        }
    }
    m.verification_rate = ratio(m.verified as f64, m.total as f64);
    m
}

pub fn donor_metrics<'a>(
    commitments: impl IntoIterator<Item = &'a Commitment>,
    responses: impl IntoIterator<Item = &'a SubmittedRecord>,
) -> DonorMetrics {
    let commitments = commitment_metrics(commitments);
    let responses = response_metrics(responses);
    let total_activities = commitments.total + responses.total;
    let verified_activities = commitments.fulfilled + responses.verified;
    DonorMetrics {
        combined: CombinedMetrics {
            total_activities,
            verified_activities,
            overall_success_rate: ratio(verified_activities as f64, total_activities as f64),
        },
        commitments,
        responses,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use shared_types::{
        ActorId, Commitment, CommitmentStatus, DonorId, EntityId, Priority, RecordId, RecordKind,
        RecordPayload, RecordStatus, RecordType, SubmittedRecord, Timestamp,
    };

    pub fn commitment(
        donor: &str,
        status: CommitmentStatus,
        committed: f64,
        verified: f64,
        created_at: Timestamp,
    ) -> Commitment {
        Commitment {
            id: uuid::Uuid::new_v4(),
            donor_id: DonorId::from(donor),
            entity_id: EntityId::from("depot-1"),
            incident_id: None,
            status,
            committed_quantity: committed,
            delivered_quantity: committed,
            verified_delivery_quantity: verified,
            created_at,
        }
    }

    pub fn response(donor: &str, status: RecordStatus, created_at: Timestamp) -> SubmittedRecord {
        SubmittedRecord {
            id: RecordId::new(),
            kind: RecordKind::Response,
            record_type: RecordType::Food,
            priority: Priority::Medium,
            status,
            entity_id: EntityId::from("depot-1"),
            donor_id: Some(DonorId::from(donor)),
            incident_id: None,
            assessor_id: ActorId::from("responder-1"),
            payload: RecordPayload::default(),
            created_at,
            submitted_at: Some(created_at),
            verified_by: None,
            verified_at: None,
            rejected_by: None,
            rejected_at: None,
            rejection_reason: None,
            review_notes: None,
        }
    }
}
