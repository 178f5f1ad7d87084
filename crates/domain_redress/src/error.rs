//! Redress domain errors
//!
//! Claim-level data-quality problems never surface here: they become
//! reasons and warnings on the eligibility result. These errors are the
//! hard validation failures that indicate an upstream defect.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{Currency, MoneyError};

/// Errors that can occur in the redress domain
#[derive(Debug, Error)]
pub enum RedressError {
    #[error("Negative amount for {field}: {value}")]
    NegativeAmount { field: String, value: Decimal },

    #[error("Amount for {field} exceeds {max}: {value}")]
    AmountOutOfRange { field: String, value: Decimal, max: Decimal },

    #[error("Claim currency {claim} does not match scheme currency {scheme}")]
    CurrencyMismatch { claim: Currency, scheme: Currency },

    #[error("Invalid scheme rules: {0}")]
    InvalidRules(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
