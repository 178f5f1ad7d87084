//! Full per-claim validation: eligibility, redress and amount comparison

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::claim::ClaimRecord;
use crate::comparison::{compare_amounts, AmountComparison};
use crate::eligibility::{evaluate_as_of, EligibilityResult};
use crate::error::RedressError;
use crate::redress::{calculate_as_of, RedressCalculation};
use crate::rules::SchemeRules;

/// Combined validation output for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimValidation {
    pub reference: String,
    pub eligibility: EligibilityResult,
    /// Calculated even when the claim is ineligible, for comparison
    pub redress_calculation: RedressCalculation,
    pub amount_comparison: AmountComparison,
}

/// Validates one claim as of `as_of`.
///
/// Data-quality problems are reported inside the result. Only hard
/// validation failures (negative or out-of-range amounts, a currency
/// other than the scheme's) return an error.
pub fn validate_claim(
    claim: &ClaimRecord,
    rules: &SchemeRules,
    as_of: NaiveDate,
) -> Result<ClaimValidation, RedressError> {
    if let Err(err) = check_record(claim, rules) {
        warn!(reference = %claim.reference, error = %err, "Claim rejected");
        return Err(err);
    }

    let eligibility = evaluate_as_of(claim, rules, as_of);
    let redress_calculation = calculate_as_of(claim, rules, as_of);
    let amount_comparison = compare_amounts(claim.claimed(), redress_calculation.total)?;

    Ok(ClaimValidation {
        reference: claim.reference.clone(),
        eligibility,
        redress_calculation,
        amount_comparison,
    })
}

fn check_record(claim: &ClaimRecord, rules: &SchemeRules) -> Result<(), RedressError> {
    claim.validate()?;
    if claim.currency != rules.currency {
        return Err(RedressError::CurrencyMismatch {
            claim: claim.currency,
            scheme: rules.currency,
        });
    }
    Ok(())
}
