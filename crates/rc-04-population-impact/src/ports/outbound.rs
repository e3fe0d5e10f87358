//! Driven Ports (SPI - Outbound)

pub use rc_01_record_store::{IncidentRegistry, RecordStore};
