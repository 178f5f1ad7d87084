//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! redress core test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, rules and dates used across tests
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
