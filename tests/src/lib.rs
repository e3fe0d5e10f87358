//! # Relief Verification Core Test Suite
//!
//! Cross-component tests that need more than one crate wired together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs              # submit → auto-approval → queue → aggregators
//!     └── verification_race.rs  # concurrent decisions on one record
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p relief-tests
//! cargo test -p relief-tests integration::verification_race
//! ```

#![allow(dead_code)]

pub mod integration;
