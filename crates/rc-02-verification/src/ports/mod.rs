//! Ports for the Verification State Machine.

pub mod inbound;
pub mod outbound;
