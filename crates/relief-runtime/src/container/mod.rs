//! # Service Container
//!
//! Configuration plus the concrete service graph over the in-memory store.
//!
//! ```text
//!                    ┌──→ VerificationService ←── AutoVerifier ──┐
//! InMemoryReliefStore├──→ AutoApprovalEngine ─────────────────────┘
//! InMemoryAuditLog   ├──→ PopulationImpactService
//!                    ├──→ DonorScoringService
//!                    └──→ QueueMetricsService
//! ```

pub mod config;
pub mod services;

pub use config::{ConfigError, ReliefConfig};
pub use services::ServiceContainer;
