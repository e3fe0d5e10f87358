//! Ports for the Auto-Approval Rule Engine.

pub mod inbound;
pub mod outbound;
