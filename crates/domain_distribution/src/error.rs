//! Distribution domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{Currency, MoneyError};

/// Errors that can occur in the distribution domain
#[derive(Debug, Error)]
pub enum DistributionError {
    #[error("Invalid split fractions: {0}")]
    InvalidFractions(String),

    #[error("Tier {tier} must not be negative, got {value}")]
    NegativeTier { tier: String, value: Decimal },

    #[error("Proceeds must not be negative, got {0}")]
    NegativeProceeds(Decimal),

    #[error("Funded amount must not be negative, got {0}")]
    NegativeFunding(Decimal),

    #[error("Invalid funding agreement terms: {0}")]
    InvalidTerms(String),

    #[error("Currency mismatch: rules are in {expected}, got {actual}")]
    CurrencyMismatch { expected: Currency, actual: Currency },

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
