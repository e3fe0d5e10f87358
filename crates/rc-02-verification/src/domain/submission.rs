//! Validation and construction of new records.

use shared_types::{
    CoreError, CoreResult, NewRecord, RecordId, RecordStatus, SubmittedRecord, Timestamp,
};

/// Bounds applied to a submission's free-text payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionLimits {
    pub max_payload_notes_chars: usize,
    pub max_media_refs: usize,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_payload_notes_chars: 10_000,
            max_media_refs: 50,
        }
    }
}

/// Shape checks that need no store access.
pub fn validate_new_record(record: &NewRecord, limits: &SubmissionLimits) -> CoreResult<()> {
    if record.entity_id.as_str().trim().is_empty() {
        return Err(CoreError::validation("entityId", "entity id is required"));
    }
    if record.assessor_id.as_str().trim().is_empty() {
        return Err(CoreError::validation("assessorId", "assessor id is required"));
    }

    let payload = &record.payload;
    if let Some(notes) = &payload.notes {
        if notes.chars().count() > limits.max_payload_notes_chars {
            return Err(CoreError::validation(
                "payload.notes",
                format!("exceeds {} characters", limits.max_payload_notes_chars),
            ));
        }
    }
    if payload.media.len() > limits.max_media_refs {
        return Err(CoreError::validation(
            "payload.media",
            format!("at most {} media references", limits.max_media_refs),
        ));
    }
    if payload.media.iter().any(|m| m.trim().is_empty()) {
        return Err(CoreError::validation("payload.media", "blank media reference"));
    }
    if let Some(point) = payload.coordinates {
        if !(-90.0..=90.0).contains(&point.lat) || !(-180.0..=180.0).contains(&point.lng) {
            return Err(CoreError::validation(
                "payload.coordinates",
                "latitude must be within ±90 and longitude within ±180",
            ));
        }
    }
    Ok(())
}

/// Build the stored record. Drafts carry no `submittedAt` until submitted.
pub fn build_record(input: NewRecord, now: Timestamp) -> SubmittedRecord {
    let (status, submitted_at) = if input.as_draft {
        (RecordStatus::Draft, None)
    } else {
        (RecordStatus::Submitted, Some(now))
    };

    SubmittedRecord {
        id: RecordId::new(),
        kind: input.kind,
        record_type: input.record_type,
        priority: input.priority,
        status,
        entity_id: input.entity_id,
        donor_id: input.donor_id,
        incident_id: input.incident_id,
        assessor_id: input.assessor_id,
        payload: input.payload,
        created_at: now,
        submitted_at,
        verified_by: None,
        verified_at: None,
        rejected_by: None,
        rejected_at: None,
        rejection_reason: None,
        review_notes: None,
    }
}
