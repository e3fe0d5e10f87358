//! # Core Domain Entities
//!
//! Defines the records, entities, donors, commitments, and incidents the
//! verification core operates on.
//!
//! ## Clusters
//!
//! - **Records**: `SubmittedRecord`, `RecordPayload`, `ImpactFigures`, `NewRecord`
//! - **Lifecycle**: `RecordStatus`, `RecordKind`, `Priority`, `RejectionReason`
//! - **Entities**: `Entity`, `AutoApprovalConfig`, `ApprovalScope`
//! - **Donors**: `Donor`, `Commitment`, `DonorStanding`
//! - **Incidents & Audit**: `Incident`, `AuditEntry`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::time::Timestamp;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Unique identifier for a submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(pub Uuid);

impl RecordId {
    /// Generate a fresh random record id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of a facility/location entity.
    EntityId
);
string_id!(
    /// Identifier of a donor organisation.
    DonorId
);
string_id!(
    /// Identifier of a disaster incident.
    IncidentId
);
string_id!(
    /// Identifier of a human or system actor.
    ActorId
);

/// `verifiedBy` value written on auto-verified records.
pub const AUTO_APPROVAL_ACTOR: &str = "auto-approval";

/// Actor id written on audit entries emitted by the system itself.
pub const SYSTEM_ACTOR: &str = "system";

// =============================================================================
// CLUSTER A: RECORD LIFECYCLE
// =============================================================================

/// Which kind of field record this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Assessment,
    Response,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Assessment => "ASSESSMENT",
            RecordKind::Response => "RESPONSE",
        }
    }
}

/// Domain category of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordType {
    Health,
    Wash,
    Shelter,
    Food,
    Security,
    Population,
    Preliminary,
}

/// Urgency of a record. Declaration order is the total order
/// `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
            Priority::Critical => "CRITICAL",
        }
    }
}

/// Verification lifecycle state of a record.
///
/// ```text
/// [DRAFT] ──submit──→ [SUBMITTED] ──verify──────→ [VERIFIED]
///                          │
///                          ├──auto-verify──→ [AUTO_VERIFIED]
///                          │
///                          └──reject───────→ [REJECTED]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Draft,
    Submitted,
    Verified,
    AutoVerified,
    Rejected,
}

impl RecordStatus {
    /// Terminal states have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RecordStatus::Verified | RecordStatus::AutoVerified | RecordStatus::Rejected
        )
    }

    /// True for both manual and automatic verification.
    pub fn is_verified(&self) -> bool {
        matches!(self, RecordStatus::Verified | RecordStatus::AutoVerified)
    }

    /// The complete lifecycle graph.
    pub fn can_transition_to(&self, next: RecordStatus) -> bool {
        matches!(
            (self, next),
            (RecordStatus::Draft, RecordStatus::Submitted)
                | (RecordStatus::Submitted, RecordStatus::Verified)
                | (RecordStatus::Submitted, RecordStatus::AutoVerified)
                | (RecordStatus::Submitted, RecordStatus::Rejected)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Draft => "DRAFT",
            RecordStatus::Submitted => "SUBMITTED",
            RecordStatus::Verified => "VERIFIED",
            RecordStatus::AutoVerified => "AUTO_VERIFIED",
            RecordStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of reasons a coordinator may reject a record with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    InadequateSupplies,
    IncompleteData,
    InaccurateInformation,
    DuplicateSubmission,
    InsufficientEvidence,
    OutOfScope,
    Other,
}

impl RejectionReason {
    pub const ALL: [RejectionReason; 7] = [
        RejectionReason::InadequateSupplies,
        RejectionReason::IncompleteData,
        RejectionReason::InaccurateInformation,
        RejectionReason::DuplicateSubmission,
        RejectionReason::InsufficientEvidence,
        RejectionReason::OutOfScope,
        RejectionReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::InadequateSupplies => "INADEQUATE_SUPPLIES",
            RejectionReason::IncompleteData => "INCOMPLETE_DATA",
            RejectionReason::InaccurateInformation => "INACCURATE_INFORMATION",
            RejectionReason::DuplicateSubmission => "DUPLICATE_SUBMISSION",
            RejectionReason::InsufficientEvidence => "INSUFFICIENT_EVIDENCE",
            RejectionReason::OutOfScope => "OUT_OF_SCOPE",
            RejectionReason::Other => "OTHER",
        }
    }
}

impl FromStr for RejectionReason {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RejectionReason::ALL
            .into_iter()
            .find(|reason| reason.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::validation("reason", format!("unknown rejection reason '{s}'")))
    }
}

// =============================================================================
// CLUSTER B: RECORDS
// =============================================================================

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Population impact figures carried by an assessment.
///
/// Every field is optional; a missing figure aggregates as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactFigures {
    #[serde(default)]
    pub lives_lost: Option<u64>,
    #[serde(default)]
    pub injured: Option<u64>,
    #[serde(default)]
    pub displaced: Option<u64>,
    #[serde(default)]
    pub houses_affected: Option<u64>,
    #[serde(default)]
    pub schools_affected: Option<u64>,
    #[serde(default)]
    pub medical_facilities_affected: Option<u64>,
    /// Free-text quantity such as `"100 hectares"`.
    #[serde(default)]
    pub agricultural_land_affected: Option<String>,
}

/// Field data attached to a record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayload {
    #[serde(default)]
    pub notes: Option<String>,
    /// References to uploaded photos/documents.
    #[serde(default)]
    pub media: Vec<String>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub impact: Option<ImpactFigures>,
}

impl RecordPayload {
    /// Non-blank notes or at least one media reference.
    pub fn has_documentation(&self) -> bool {
        let has_notes = self
            .notes
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false);
        has_notes || self.media.iter().any(|m| !m.trim().is_empty())
    }
}

/// A field-submitted assessment or response.
///
/// Owned by the record store; its status changes only through the
/// verification state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedRecord {
    pub id: RecordId,
    pub kind: RecordKind,
    pub record_type: RecordType,
    pub priority: Priority,
    pub status: RecordStatus,
    pub entity_id: EntityId,
    #[serde(default)]
    pub donor_id: Option<DonorId>,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
    pub assessor_id: ActorId,
    #[serde(default)]
    pub payload: RecordPayload,
    pub created_at: Timestamp,
    #[serde(default)]
    pub submitted_at: Option<Timestamp>,
    #[serde(default)]
    pub verified_by: Option<ActorId>,
    #[serde(default)]
    pub verified_at: Option<Timestamp>,
    #[serde(default)]
    pub rejected_by: Option<ActorId>,
    #[serde(default)]
    pub rejected_at: Option<Timestamp>,
    #[serde(default)]
    pub rejection_reason: Option<RejectionReason>,
    #[serde(default)]
    pub review_notes: Option<String>,
}

impl SubmittedRecord {
    /// When the record entered the verification queue.
    pub fn queued_since(&self) -> Timestamp {
        self.submitted_at.unwrap_or(self.created_at)
    }

    /// When the terminal decision was taken, if any.
    pub fn decided_at(&self) -> Option<Timestamp> {
        match self.status {
            RecordStatus::Verified | RecordStatus::AutoVerified => self.verified_at,
            RecordStatus::Rejected => self.rejected_at,
            _ => None,
        }
    }
}

/// Input for a new record submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub kind: RecordKind,
    pub record_type: RecordType,
    pub priority: Priority,
    pub entity_id: EntityId,
    #[serde(default)]
    pub donor_id: Option<DonorId>,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
    pub assessor_id: ActorId,
    #[serde(default)]
    pub payload: RecordPayload,
    /// Save as DRAFT instead of entering the queue.
    #[serde(default)]
    pub as_draft: bool,
}

// =============================================================================
// CLUSTER C: ENTITIES & AUTO-APPROVAL CONFIGURATION
// =============================================================================

/// Current schema version of the persisted auto-approval document.
pub const AUTO_APPROVAL_SCHEMA_VERSION: u32 = 1;

/// The one field path under which an entity persists its auto-approval
/// document. Producers and consumers both go through this constant.
pub const AUTO_APPROVAL_FIELD: &str = "autoApproval";

/// Which record kinds an auto-approval rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalScope {
    Assessments,
    Responses,
    Both,
}

impl ApprovalScope {
    pub fn covers(&self, kind: RecordKind) -> bool {
        matches!(
            (self, kind),
            (ApprovalScope::Both, _)
                | (ApprovalScope::Assessments, RecordKind::Assessment)
                | (ApprovalScope::Responses, RecordKind::Response)
        )
    }
}

/// Typed, versioned auto-approval rule owned by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoApprovalConfig {
    pub schema_version: u32,
    pub enabled: bool,
    pub scope: ApprovalScope,
    #[serde(default)]
    pub types_allowed: Option<Vec<RecordType>>,
    #[serde(default)]
    pub max_priority: Option<Priority>,
    #[serde(default)]
    pub requires_documentation: bool,
    #[serde(default)]
    pub updated_at: Timestamp,
    #[serde(default)]
    pub updated_by: Option<ActorId>,
}

impl AutoApprovalConfig {
    /// Rule identifier recorded on audit entries for auto-verified records.
    pub fn rule_id(&self, entity_id: &EntityId) -> String {
        format!("{}:v{}@{}", entity_id, self.schema_version, self.updated_at)
    }
}

/// A facility or location that records are associated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub entity_type: String,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    #[serde(default)]
    pub auto_approval: Option<AutoApprovalConfig>,
}

// =============================================================================
// CLUSTER D: DONORS
// =============================================================================

/// A donor organisation with its denormalized leaderboard standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: DonorId,
    pub name: String,
    #[serde(default)]
    pub self_reported_delivery_rate: f64,
    #[serde(default)]
    pub verified_delivery_rate: f64,
    #[serde(default)]
    pub leaderboard_rank: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub ranked_at: Option<Timestamp>,
}

impl Donor {
    pub fn new(id: impl Into<DonorId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            self_reported_delivery_rate: 0.0,
            verified_delivery_rate: 0.0,
            leaderboard_rank: None,
            score: None,
            ranked_at: None,
        }
    }
}

/// Delivery state of a donor commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitmentStatus {
    Planned,
    Partial,
    Complete,
}

/// A donor's pledge to deliver supplies to an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commitment {
    pub id: Uuid,
    pub donor_id: DonorId,
    pub entity_id: EntityId,
    #[serde(default)]
    pub incident_id: Option<IncidentId>,
    pub status: CommitmentStatus,
    pub committed_quantity: f64,
    #[serde(default)]
    pub delivered_quantity: f64,
    #[serde(default)]
    pub verified_delivery_quantity: f64,
    pub created_at: Timestamp,
}

/// Leaderboard standing written back to a donor after a scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorStanding {
    pub donor_id: DonorId,
    pub rank: u32,
    pub score: f64,
    pub self_reported_delivery_rate: f64,
    pub verified_delivery_rate: f64,
    pub ranked_at: Timestamp,
}

// =============================================================================
// CLUSTER E: INCIDENTS & AUDIT
// =============================================================================

/// A disaster incident that assessments may be linked to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: IncidentId,
    pub name: String,
    pub incident_type: String,
    pub created_at: Timestamp,
}

/// Action recorded on an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditAction {
    #[serde(rename = "record.drafted")]
    RecordDrafted,
    #[serde(rename = "record.submitted")]
    RecordSubmitted,
    #[serde(rename = "record.verified")]
    RecordVerified,
    #[serde(rename = "record.auto_verified")]
    RecordAutoVerified,
    #[serde(rename = "record.rejected")]
    RecordRejected,
    #[serde(rename = "entity.auto_approval_configured")]
    AutoApprovalConfigured,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::RecordDrafted => "record.drafted",
            AuditAction::RecordSubmitted => "record.submitted",
            AuditAction::RecordVerified => "record.verified",
            AuditAction::RecordAutoVerified => "record.auto_verified",
            AuditAction::RecordRejected => "record.rejected",
            AuditAction::AutoApprovalConfigured => "entity.auto_approval_configured",
        }
    }
}

/// One append-only audit log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub actor: ActorId,
    pub action: AuditAction,
    pub resource_id: String,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
}

impl AuditEntry {
    pub fn new(
        actor: ActorId,
        action: AuditAction,
        resource_id: impl Into<String>,
        timestamp: Timestamp,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor,
            action,
            resource_id: resource_id.into(),
            timestamp,
            notes,
        }
    }
}
