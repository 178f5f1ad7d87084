//! Portfolio batch validation
//!
//! Each claim is validated independently; a rejected record does not stop
//! the batch. Outcomes keep input order so callers can zip them back to the
//! submitted rows. [`validate_outcomes`] and [`PortfolioValidation::from_outcomes`]
//! are split so that large batches can be validated in chunks on separate
//! workers and reassembled.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{Money, RunId};
use crate::claim::ClaimRecord;
use crate::eligibility::EligibilityStatus;
use crate::rules::SchemeRules;
use crate::validation::{validate_claim, ClaimValidation};

/// Result for one record in a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClaimOutcome {
    Validated(Box<ClaimValidation>),
    /// The record failed hard validation
    Rejected { reference: String, error: String },
}

impl ClaimOutcome {
    pub fn reference(&self) -> &str {
        match self {
            ClaimOutcome::Validated(validation) => &validation.reference,
            ClaimOutcome::Rejected { reference, .. } => reference,
        }
    }
}

/// Counts and totals across a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_claims: usize,
    pub eligible: usize,
    pub requires_review: usize,
    pub ineligible: usize,
    pub rejected: usize,
    /// Sum of claimed amounts over eligible claims
    pub total_claimed: Money,
    /// Sum of calculated redress over eligible claims
    pub total_redress: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValidation {
    pub run_id: RunId,
    pub as_of: NaiveDate,
    pub outcomes: Vec<ClaimOutcome>,
    pub summary: PortfolioSummary,
}

impl PortfolioValidation {
    /// Assembles a report from outcomes already in input order
    pub fn from_outcomes(outcomes: Vec<ClaimOutcome>, rules: &SchemeRules, as_of: NaiveDate) -> Self {
        let mut summary = PortfolioSummary {
            total_claims: outcomes.len(),
            eligible: 0,
            requires_review: 0,
            ineligible: 0,
            rejected: 0,
            total_claimed: Money::zero(rules.currency),
            total_redress: Money::zero(rules.currency),
        };
        let mut claimed = Decimal::ZERO;
        let mut redress = Decimal::ZERO;

        for outcome in &outcomes {
            match outcome {
                ClaimOutcome::Rejected { .. } => summary.rejected += 1,
                ClaimOutcome::Validated(validation) => match validation.eligibility.status {
                    EligibilityStatus::Eligible => {
                        summary.eligible += 1;
                        redress += validation.redress_calculation.total.amount();
                        if let Some(amount) = validation.amount_comparison.claimed_amount {
                            claimed += amount.amount();
                        }
                    }
                    EligibilityStatus::RequiresReview => summary.requires_review += 1,
                    EligibilityStatus::Ineligible => summary.ineligible += 1,
                },
            }
        }

        // Validated claims always carry the scheme currency
        summary.total_claimed = Money::new(claimed, rules.currency);
        summary.total_redress = Money::new(redress, rules.currency);

        let run_id = RunId::new_v7();
        info!(
            run_id = %run_id,
            total = summary.total_claims,
            eligible = summary.eligible,
            requires_review = summary.requires_review,
            ineligible = summary.ineligible,
            rejected = summary.rejected,
            "Portfolio validated"
        );

        Self {
            run_id,
            as_of,
            outcomes,
            summary,
        }
    }

    /// Outcomes for claims that passed every check
    pub fn eligible_claims(&self) -> impl Iterator<Item = &ClaimValidation> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            ClaimOutcome::Validated(validation) if validation.eligibility.eligible() => Some(validation.as_ref()),
            _ => None,
        })
    }
}

/// Validates a slice of claims, one outcome per claim in the same order
pub fn validate_outcomes(claims: &[ClaimRecord], rules: &SchemeRules, as_of: NaiveDate) -> Vec<ClaimOutcome> {
    claims
        .iter()
        .map(|claim| match validate_claim(claim, rules, as_of) {
            Ok(validation) => ClaimOutcome::Validated(Box::new(validation)),
            Err(err) => ClaimOutcome::Rejected {
                reference: claim.reference.clone(),
                error: err.to_string(),
            },
        })
        .collect()
}

/// Validates every claim and summarises the portfolio
pub fn validate_portfolio(claims: &[ClaimRecord], rules: &SchemeRules, as_of: NaiveDate) -> PortfolioValidation {
    PortfolioValidation::from_outcomes(validate_outcomes(claims, rules, as_of), rules, as_of)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn claim(reference: &str, commission: Decimal, claimed: Option<Decimal>) -> ClaimRecord {
        let mut claim = ClaimRecord::new(reference);
        claim.agreement_date = Some("2019-06-15".to_string());
        claim.submission_date = Some("2024-11-01".to_string());
        claim.product_type = Some("PCP".to_string());
        claim.commission_amount = commission;
        claim.total_cost_of_credit = dec!(5000);
        claim.claimed_amount = claimed;
        claim
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let mut negative = claim("C-4", dec!(3000), None);
        negative.loan_amount = dec!(-1);
        let mut old = claim("C-3", dec!(3000), None);
        old.agreement_date = Some("2001-01-01".to_string());

        let claims = vec![
            claim("C-1", dec!(3000), Some(dec!(4500))),
            claim("C-2", dec!(1200), Some(dec!(1000))),
            old,
            negative,
            claim("C-5", dec!(4000), None),
        ];

        let report = validate_portfolio(&claims, &SchemeRules::default(), as_of());

        assert_eq!(report.summary.total_claims, 5);
        assert_eq!(report.summary.eligible, 2);
        assert_eq!(report.summary.requires_review, 1);
        assert_eq!(report.summary.ineligible, 1);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.summary.total_claimed.amount(), dec!(4500));
        assert_eq!(report.eligible_claims().count(), 2);
    }

    #[test]
    fn test_outcomes_keep_input_order() {
        let claims: Vec<_> = (0..20)
            .map(|i| claim(&format!("C-{}", i), dec!(3000), None))
            .collect();

        let report = validate_portfolio(&claims, &SchemeRules::default(), as_of());

        let references: Vec<_> = report.outcomes.iter().map(ClaimOutcome::reference).collect();
        let expected: Vec<_> = claims.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(references, expected);
    }

    #[test]
    fn test_chunked_validation_matches_whole_batch() {
        let claims: Vec<_> = (0..7)
            .map(|i| claim(&format!("C-{}", i), Decimal::from(1000 + i * 500), None))
            .collect();
        let rules = SchemeRules::default();

        let whole = validate_outcomes(&claims, &rules, as_of());
        let chunked: Vec<_> = claims
            .chunks(3)
            .flat_map(|chunk| validate_outcomes(chunk, &rules, as_of()))
            .collect();

        assert_eq!(whole, chunked);
    }

    #[test]
    fn test_empty_batch() {
        let report = validate_portfolio(&[], &SchemeRules::default(), as_of());

        assert_eq!(report.summary.total_claims, 0);
        assert!(report.summary.total_redress.is_zero());
    }
}
