//! Domain layer for the Population Impact Aggregator.

pub mod impact;
pub mod quantity;

pub use impact::{aggregate, PopulationImpact};
pub use quantity::leading_quantity;
