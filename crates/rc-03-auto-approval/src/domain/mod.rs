//! Domain layer for the Auto-Approval Rule Engine.

pub mod config;
pub mod rule;

pub use config::{
    decode_config, decode_entity, ApprovalConditions, ConfigureAutoApproval,
    MAX_ENTITIES_PER_CONFIGURE,
};
pub use rule::{evaluate, matches, RuleDecision};
