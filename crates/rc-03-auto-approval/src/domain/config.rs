//! The configuration boundary.
//!
//! Raw entity documents are decoded here exactly once. Every reader and every
//! writer goes through the `autoApproval` field path and the current schema
//! version; anything else decodes to `None`, which the rule treats as disabled.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{
    ActorId, ApprovalScope, AutoApprovalConfig, CoreError, CoreResult, Entity, EntityId, Priority,
    RecordType, Timestamp, AUTO_APPROVAL_FIELD, AUTO_APPROVAL_SCHEMA_VERSION,
};

/// Maximum entities one configure call may touch.
pub const MAX_ENTITIES_PER_CONFIGURE: usize = 500;

/// Read the typed config out of a raw entity document.
pub fn decode_config(raw: &Value) -> Option<AutoApprovalConfig> {
    let section = raw.get(AUTO_APPROVAL_FIELD)?;
    let config: AutoApprovalConfig = serde_json::from_value(section.clone()).ok()?;
    (config.schema_version == AUTO_APPROVAL_SCHEMA_VERSION).then_some(config)
}

/// Decode a raw entity document. A bad `autoApproval` section does not fail
/// the entity; it only leaves the rule unset.
pub fn decode_entity(raw: &Value) -> Result<Entity, serde_json::Error> {
    let mut base = raw.clone();
    if let Value::Object(map) = &mut base {
        map.remove(AUTO_APPROVAL_FIELD);
    }
    let mut entity: Entity = serde_json::from_value(base)?;
    entity.auto_approval = decode_config(raw);
    Ok(entity)
}

/// Optional narrowing conditions of a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalConditions {
    #[serde(default)]
    pub types_allowed: Option<Vec<RecordType>>,
    #[serde(default)]
    pub max_priority: Option<Priority>,
    #[serde(default)]
    pub requires_documentation: bool,
}

/// Request to write one rule to many entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureAutoApproval {
    pub entity_ids: Vec<EntityId>,
    pub enabled: bool,
    pub scope: ApprovalScope,
    #[serde(default)]
    pub conditions: ApprovalConditions,
}

impl ConfigureAutoApproval {
    pub fn validate(&self) -> CoreResult<()> {
        if self.entity_ids.is_empty() {
            return Err(CoreError::validation(
                "entityIds",
                "at least one entity is required",
            ));
        }
        if self.entity_ids.len() > MAX_ENTITIES_PER_CONFIGURE {
            return Err(CoreError::validation(
                "entityIds",
                format!("at most {} entities per request", MAX_ENTITIES_PER_CONFIGURE),
            ));
        }
        if self.entity_ids.iter().any(|id| id.as_str().trim().is_empty()) {
            return Err(CoreError::validation("entityIds", "blank entity id"));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.entity_ids.iter().find(|id| !seen.insert(*id)) {
            return Err(CoreError::validation(
                "entityIds",
                format!("duplicate entity id {}", dup),
            ));
        }
        if self
            .conditions
            .types_allowed
            .as_ref()
            .is_some_and(|types| types.is_empty())
        {
            return Err(CoreError::validation(
                "conditions.typesAllowed",
                "must list at least one type when present",
            ));
        }
        Ok(())
    }

    /// The versioned document stored on every listed entity.
    pub fn to_config(&self, now: Timestamp, actor: &ActorId) -> AutoApprovalConfig {
        AutoApprovalConfig {
            schema_version: AUTO_APPROVAL_SCHEMA_VERSION,
            enabled: self.enabled,
            scope: self.scope,
            types_allowed: self.conditions.types_allowed.clone(),
            max_priority: self.conditions.max_priority,
            requires_documentation: self.conditions.requires_documentation,
            updated_at: now,
            updated_by: Some(actor.clone()),
        }
    }
}
