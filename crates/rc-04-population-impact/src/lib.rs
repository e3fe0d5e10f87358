//! # Population Impact Aggregator
//!
//! Read-only snapshot of an incident's human and material impact, summed over
//! every assessment that references the incident.
//!
//! | Output | Rule |
//! |--------|------|
//! | numeric figures | sum; a missing figure is 0 |
//! | `agriculturalLand` | sum of the leading number of each free-text quantity |
//! | `epicenter` | mean `(lat, lng)` of geo-tagged assessments, else `None` |
//! | `assessmentCount` | number of linked assessments |
//!
//! The fold in `domain::aggregate` is pure; the service only fetches rows.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{aggregate, leading_quantity, PopulationImpact};
pub use ports::inbound::PopulationImpactApi;
pub use service::PopulationImpactService;
