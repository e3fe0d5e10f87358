//! # Relief Runtime Library
//!
//! Wiring and façade for the relief verification core. The demo entry point
//! is the `main.rs` binary.
//!
//! ## Modules
//!
//! - `container/` - configuration and the concrete service graph
//! - `node` - [`ReliefNode`], the calls the external boundary makes
//! - `seed` - JSON snapshot loading into the in-memory store

pub mod container;
pub mod node;
pub mod seed;

pub use container::{ConfigError, ReliefConfig, ServiceContainer};
pub use node::ReliefNode;
pub use seed::{apply_seed, SeedError, SeedReport, SeedSnapshot};
