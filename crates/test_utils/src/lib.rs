//! Test Utilities Crate
//!
//! Shared fixtures and helpers for the dispensing and billing test suites.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built stock snapshots and dates
//! - `builders`: Builder patterns for batches, bill lines, and preview requests
//! - `assertions`: Assertion helpers for allocations, bills, and money
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
