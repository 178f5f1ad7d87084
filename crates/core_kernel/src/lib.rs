//! Core Kernel - Foundational types and utilities for the redress system
//!
//! This crate provides the building blocks shared by the domain crates:
//! - Money and rate types with precise decimal arithmetic
//! - Claim-date parsing and elapsed-time helpers
//! - Common identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError, Rate};
pub use temporal::{
    parse_claim_date, years_between, days_between, DateParseError, Timezone,
    CLAIM_DATE_FORMATS, DAYS_PER_YEAR,
};
pub use identifiers::RunId;
