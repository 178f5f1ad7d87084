//! Claim-date handling
//!
//! Claim records arrive from spreadsheet and document ingestion with dates in
//! a handful of textual layouts. This module parses them against an explicit,
//! ordered list of formats and provides the elapsed-time arithmetic used by
//! the eligibility and redress rules.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error;

/// Accepted claim-date layouts, tried in this order
pub const CLAIM_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Average year length used for elapsed-year calculations
pub const DAYS_PER_YEAR: Decimal = dec!(365.25);

/// Errors raised when a claim date cannot be read
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateParseError {
    #[error("date not provided")]
    Missing,

    #[error("invalid date format: {0}")]
    InvalidFormat(String),
}

/// Parses a claim date, trying each of [`CLAIM_DATE_FORMATS`] in order.
///
/// The first format that parses wins. Surrounding whitespace is ignored;
/// an empty string is reported as [`DateParseError::Missing`].
///
/// # Example
///
/// ```rust
/// use core_kernel::parse_claim_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2019, 6, 15).unwrap();
/// assert_eq!(parse_claim_date("2019-06-15").unwrap(), expected);
/// assert_eq!(parse_claim_date("15/06/2019").unwrap(), expected);
/// assert_eq!(parse_claim_date("15-06-2019").unwrap(), expected);
/// ```
pub fn parse_claim_date(raw: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Missing);
    }

    CLAIM_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DateParseError::InvalidFormat(trimmed.to_string()))
}

/// Whole days from `from` to `to` (negative when `to` is earlier)
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Elapsed years from `from` to `to`, as whole days over 365.25
pub fn years_between(from: NaiveDate, to: NaiveDate) -> Decimal {
    Decimal::from(days_between(from, to)) / DAYS_PER_YEAR
}

/// Timezone wrapper for the jurisdiction whose calendar defines "today"
///
/// Wraps chrono_tz::Tz with string serialization so it can be read from
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Timezone {
    /// The calendar date of `instant` in this timezone
    pub fn date_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.0).date_naive()
    }

    /// Today's calendar date in this timezone
    pub fn today(&self) -> NaiveDate {
        self.date_of(Utc::now())
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self(chrono_tz::Europe::London)
    }
}

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}
