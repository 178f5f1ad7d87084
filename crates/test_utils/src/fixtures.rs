//! Pre-built Test Fixtures
//!
//! Provides ready-to-use claims, rules and dates. The claims mirror the
//! cases the scheme is usually demonstrated with, so expected verdicts are
//! stable and easy to reason about.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_distribution::{FundedClaim, LfaTerms, PriorityRules, PriorityTerms, WaterfallDistributor};
use domain_redress::{ClaimRecord, SchemeRules};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::builders::ClaimRecordBuilder;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn gbp(amount: Decimal) -> Money {
        Money::new(amount, Currency::GBP)
    }

    pub fn gbp_zero() -> Money {
        Money::zero(Currency::GBP)
    }

    /// EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for calendar dates
pub struct DateFixtures;

impl DateFixtures {
    /// Evaluation date used by most scenarios (1 Nov 2024)
    pub fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
    }

    /// Agreement date inside the scheme window (15 Jun 2019)
    pub fn agreement() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 6, 15).unwrap()
    }

    /// First day of the default scheme window
    pub fn window_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2007, 4, 6).unwrap()
    }

    /// Last day of the default scheme window
    pub fn window_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 28).unwrap()
    }
}

/// Fixture for claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// PCP claim, 60% commission, undisclosed: eligible
    pub fn eligible_pcp() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .with_reference("TEST-001")
            .with_claimed_amount(dec!(4500))
            .build()
    }

    /// HP claim, 24% commission: requires review
    pub fn below_threshold_hp() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .with_reference("TEST-002")
            .with_agreement_date("2015-03-20")
            .with_product_type("HP")
            .with_loan_amount(dec!(15000))
            .with_commission(dec!(1200), dec!(5000))
            .with_claimed_amount(dec!(1800))
            .build()
    }

    /// Agreement before the scheme window: ineligible
    pub fn before_window() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .with_reference("TEST-003")
            .with_agreement_date("01/01/2005")
            .build()
    }

    /// Product outside the scheme: ineligible
    pub fn uncovered_product() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .with_reference("TEST-004")
            .with_product_type("Personal Loan")
            .build()
    }

    /// Zero cost of credit, so the commission percentage is unknown
    pub fn zero_cost_of_credit() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .with_reference("TEST-005")
            .with_commission(dec!(3000), Decimal::ZERO)
            .build()
    }

    /// Negative loan amount: fails hard validation
    pub fn negative_amount() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .with_reference("TEST-006")
            .with_loan_amount(dec!(-100))
            .build()
    }

    /// One claim of each kind, in a fixed order
    pub fn mixed_portfolio() -> Vec<ClaimRecord> {
        vec![
            Self::eligible_pcp(),
            Self::below_threshold_hp(),
            Self::before_window(),
            Self::uncovered_product(),
            Self::zero_cost_of_credit(),
            Self::negative_amount(),
        ]
    }
}

/// Fixture for scheme and priority configuration
pub struct RulesFixtures;

impl RulesFixtures {
    pub fn scheme() -> SchemeRules {
        SchemeRules::default()
    }

    pub fn capped_scheme(cap: Decimal) -> SchemeRules {
        SchemeRules::default().with_max_redress_amount(cap)
    }

    /// Priority deed terms: 20,000 costs, 10,000 first-tier return,
    /// 5,000 overrun, 80/20 split
    pub fn priority_terms() -> PriorityTerms {
        PriorityTerms::new(dec!(20000), dec!(10000), dec!(5000))
    }

    pub fn priority_rules() -> PriorityRules {
        PriorityRules::new(Self::priority_terms()).unwrap()
    }

    pub fn distributor() -> WaterfallDistributor {
        WaterfallDistributor::new(Self::priority_rules()).unwrap()
    }

    /// Funding agreement terms: 50,000 cap, UK, ATE insurance required
    pub fn lfa_terms() -> LfaTerms {
        LfaTerms::default()
    }
}

/// Fixture for funded claims
pub struct FundingFixtures;

impl FundingFixtures {
    /// Funded within cap with every required document on file
    pub fn documented(reference: &str, funded: Decimal) -> FundedClaim {
        FundedClaim::new(reference, funded).with_documents(["claim_form", "lfa_signed", "insurance_policy"])
    }

    /// Funded with nothing on file
    pub fn undocumented(reference: &str, funded: Decimal) -> FundedClaim {
        FundedClaim::new(reference, funded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_portfolio_has_unique_references() {
        let portfolio = ClaimFixtures::mixed_portfolio();
        let references: std::collections::BTreeSet<_> = portfolio.iter().map(|c| c.reference.as_str()).collect();
        assert_eq!(references.len(), portfolio.len());
    }

    #[test]
    fn test_rules_fixtures_are_valid() {
        assert!(RulesFixtures::scheme().validate().is_ok());
        assert!(RulesFixtures::priority_terms().validate().is_ok());
        assert!(RulesFixtures::lfa_terms().validate().is_ok());
    }

    #[test]
    fn test_window_fixtures_match_defaults() {
        let rules = RulesFixtures::scheme();
        assert_eq!(rules.min_date, DateFixtures::window_start());
        assert_eq!(rules.max_date, DateFixtures::window_end());
    }
}
