//! Integration tests across component crates.

pub mod flows;
pub mod verification_race;
