//! Ports module for the Record Store.

pub mod outbound;

pub use outbound::{DonorLedger, EntityStore, IncidentRegistry, RecordStore};
