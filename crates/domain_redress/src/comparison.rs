//! Claimed-amount comparison against the scheme calculation

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Money, MoneyError};
use crate::error::RedressError;

/// Variance (as a percentage of the calculated amount) inside which a
/// claimed amount is considered to agree with the calculation
pub const ALIGNMENT_TOLERANCE_PCT: Decimal = dec!(10);

/// How a claimed amount relates to the scheme calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountAssessment {
    Aligns,
    ClaimedHigher,
    ClaimedLower,
    /// No claimed amount was supplied
    NotClaimed,
}

impl AmountAssessment {
    pub fn description(&self) -> &'static str {
        match self {
            AmountAssessment::Aligns => "Claimed amount aligns with scheme calculation",
            AmountAssessment::ClaimedHigher => {
                "Claimed amount higher than scheme calculation - review justification"
            }
            AmountAssessment::ClaimedLower => {
                "Claimed amount lower than scheme calculation - may be under-claimed"
            }
            AmountAssessment::NotClaimed => "No claimed amount provided",
        }
    }

    fn from_variance_pct(pct: Decimal) -> Self {
        if pct.abs() < ALIGNMENT_TOLERANCE_PCT {
            AmountAssessment::Aligns
        } else if pct > ALIGNMENT_TOLERANCE_PCT {
            AmountAssessment::ClaimedHigher
        } else {
            AmountAssessment::ClaimedLower
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountComparison {
    pub claimed_amount: Option<Money>,
    pub calculated_amount: Money,
    /// `claimed - calculated`
    pub variance: Money,
    /// Variance as a percentage of the calculated amount (0 when that is 0)
    pub variance_pct: Decimal,
    pub assessment: AmountAssessment,
    /// Human-readable assessment including the variance
    pub summary: String,
}

/// Compares a claimed amount with the scheme's calculated total.
///
/// `|pct| < 10` aligns, `pct > 10` is higher and everything else is lower,
/// so a variance of exactly +10% reads as lower. A missing or zero claim
/// yields [`AmountAssessment::NotClaimed`] with zero variance.
pub fn compare_amounts(claimed: Option<Money>, calculated: Money) -> Result<AmountComparison, RedressError> {
    let claimed = claimed.filter(|amount| !amount.is_zero());

    let Some(claimed_amount) = claimed else {
        return Ok(AmountComparison {
            claimed_amount: None,
            calculated_amount: calculated,
            variance: Money::zero(calculated.currency()),
            variance_pct: Decimal::ZERO,
            assessment: AmountAssessment::NotClaimed,
            summary: AmountAssessment::NotClaimed.description().to_string(),
        });
    };

    let variance = claimed_amount.checked_sub(&calculated)?;
    let variance_pct = match variance.ratio_to(&calculated)? {
        Some(ratio) => ratio.checked_mul(dec!(100)).ok_or(MoneyError::Overflow)?,
        None => Decimal::ZERO,
    };
    let assessment = AmountAssessment::from_variance_pct(variance_pct);

    let summary = match assessment {
        AmountAssessment::ClaimedHigher => format!(
            "Claimed amount {:.1}% higher than scheme calculation - review justification",
            variance_pct.round_dp(1)
        ),
        AmountAssessment::ClaimedLower => format!(
            "Claimed amount {:.1}% lower than scheme calculation - may be under-claimed",
            variance_pct.abs().round_dp(1)
        ),
        other => other.description().to_string(),
    };

    Ok(AmountComparison {
        claimed_amount: Some(claimed_amount),
        calculated_amount: calculated,
        variance,
        variance_pct,
        assessment,
        summary,
    })
}
