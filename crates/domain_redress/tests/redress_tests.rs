//! Comprehensive tests for domain_redress

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::Currency;
use domain_redress::{
    calculate_as_of, evaluate_as_of, validate_claim, validate_portfolio, AmountAssessment,
    ClaimOutcome, EligibilityStatus, RedressError, SchemeRules, MAX_CLAIM_AMOUNT,
    STANDARD_DISTRESS_AWARD,
};
use test_utils::{
    assert_err_variant, assert_has_reason, assert_has_warning, claim_record_strategy, date_strategy, ClaimFixtures,
    ClaimRecordBuilder, DateFixtures, RulesFixtures,
};

// ============================================================================
// Eligibility Scenarios
// ============================================================================

mod eligibility_scenarios {
    use super::*;

    #[test]
    fn test_high_commission_pcp_is_eligible() {
        let result = evaluate_as_of(&ClaimFixtures::eligible_pcp(), &RulesFixtures::scheme(), DateFixtures::as_of());

        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert_eq!(result.commission_pct, Some(dec!(60)));
        assert_has_reason(&result, "Commission 60.0% meets Plevin threshold (50%)");
        assert_has_reason(&result, "Commission not adequately disclosed");
        assert!(result.recommendation.starts_with("APPROVE"));
    }

    #[test]
    fn test_low_commission_requires_review() {
        let result = evaluate_as_of(
            &ClaimFixtures::below_threshold_hp(),
            &RulesFixtures::scheme(),
            DateFixtures::as_of(),
        );

        assert_eq!(result.status, EligibilityStatus::RequiresReview);
        assert!(result.date_ok && result.product_ok && result.limitation_ok);
        assert!(!result.commission_ok);
        assert_has_reason(&result, "Commission 24.0% below Plevin threshold");
        assert_has_warning(&result, "Commission below 50% threshold - review for other unfairness grounds");
        assert_has_warning(&result, "May still be eligible under other unfairness grounds");
    }

    #[test]
    fn test_old_agreement_flags_limitation_but_passes() {
        let result = evaluate_as_of(
            &ClaimFixtures::below_threshold_hp(),
            &RulesFixtures::scheme(),
            DateFixtures::as_of(),
        );

        assert!(result.limitation_ok);
        assert_has_warning(&result, "Agreement over 6 years old - verify date of knowledge");
        assert_has_reason(&result, "Limitation: 9.6 years since agreement (standard: 6 years)");
    }

    #[test]
    fn test_agreement_before_window_is_rejected() {
        let result = evaluate_as_of(&ClaimFixtures::before_window(), &RulesFixtures::scheme(), DateFixtures::as_of());

        assert_eq!(result.status, EligibilityStatus::Ineligible);
        assert_has_reason(&result, "Agreement date 2005-01-01 is before eligible period (min: 2007-04-06)");
        assert!(result.recommendation.starts_with("REJECT"));
    }

    #[test]
    fn test_zero_cost_of_credit_never_reads_as_zero_percent() {
        let result = evaluate_as_of(
            &ClaimFixtures::zero_cost_of_credit(),
            &RulesFixtures::scheme(),
            DateFixtures::as_of(),
        );

        assert_eq!(result.commission_pct, None);
        assert!(!result.commission_ok);
        assert!(!result.reasons.iter().any(|r| r.contains("0.0%")));
        assert_has_warning(&result, "commission percentage unknown");
    }

    #[test]
    fn test_supplied_percentage_is_used() {
        let claim = ClaimRecordBuilder::new()
            .with_commission(dec!(1000), dec!(5000))
            .with_commission_pct(dec!(55))
            .build();

        let result = evaluate_as_of(&claim, &RulesFixtures::scheme(), DateFixtures::as_of());

        assert_eq!(result.commission_pct, Some(dec!(55)));
        assert!(result.commission_ok);
    }

    #[test]
    fn test_custom_threshold() {
        let rules = SchemeRules::default().with_plevin_threshold(dec!(20));
        let result = evaluate_as_of(&ClaimFixtures::below_threshold_hp(), &rules, DateFixtures::as_of());

        assert_eq!(result.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn test_without_submission_date_uses_as_of() {
        let claim = ClaimRecordBuilder::new()
            .with_agreement_date("2010-01-01")
            .without_submission_date()
            .build();

        let result = evaluate_as_of(&claim, &RulesFixtures::scheme(), DateFixtures::as_of());

        assert_has_reason(&result, "Limitation: 14.8 years");
    }

    #[test]
    fn test_unreadable_submission_date_passes_limitation_with_warning() {
        let claim = ClaimRecordBuilder::new().with_submission_date("soon").build();

        let result = evaluate_as_of(&claim, &RulesFixtures::scheme(), DateFixtures::as_of());

        assert!(result.limitation_ok);
        assert_has_warning(&result, "Could not verify limitation period");
    }
}

// ============================================================================
// Redress Calculation
// ============================================================================

mod redress_tests {
    use super::*;

    #[test]
    fn test_redress_uses_standard_distress_award() {
        let result = calculate_as_of(&ClaimFixtures::eligible_pcp(), &RulesFixtures::scheme(), DateFixtures::as_of());

        assert_eq!(result.distress_award.amount(), STANDARD_DISTRESS_AWARD);
        assert_eq!(result.base_amount.amount(), dec!(1500));
        assert_eq!(
            result.total.amount(),
            result.base_amount.amount()
                + result.statutory_interest.amount()
                + result.distress_award.amount()
                + result.consequential_losses.amount()
        );
    }

    #[test]
    fn test_consequential_losses_are_added() {
        let claim = ClaimRecordBuilder::new()
            .without_agreement_date()
            .with_consequential_losses(dec!(400))
            .build();

        let result = calculate_as_of(&claim, &RulesFixtures::scheme(), DateFixtures::as_of());

        assert_eq!(result.total.amount(), dec!(2050));
        assert!(result.notes.iter().any(|n| n == "Consequential losses: £400.00"));
    }

    #[test]
    fn test_cap() {
        let result = calculate_as_of(
            &ClaimFixtures::eligible_pcp(),
            &RulesFixtures::capped_scheme(dec!(1000)),
            DateFixtures::as_of(),
        );

        assert!(result.capped);
        assert_eq!(result.total.amount(), dec!(1000));
    }
}

// ============================================================================
// Validation
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_validate_claim_compares_claimed_amount() {
        let claim = ClaimRecordBuilder::new()
            .without_agreement_date()
            .with_claimed_amount(dec!(1700))
            .build();

        // Calculated: 1500 base + 150 distress = 1650; 1700 is 3% higher
        let result = validate_claim(&claim, &RulesFixtures::scheme(), DateFixtures::as_of()).unwrap();

        assert_eq!(result.amount_comparison.assessment, AmountAssessment::Aligns);
        assert_eq!(result.amount_comparison.variance.amount(), dec!(50));
    }

    #[test]
    fn test_validate_claim_without_claimed_amount() {
        let claim = ClaimRecordBuilder::new().build();

        let result = validate_claim(&claim, &RulesFixtures::scheme(), DateFixtures::as_of()).unwrap();

        assert_eq!(result.amount_comparison.assessment, AmountAssessment::NotClaimed);
    }

    #[test]
    fn test_validate_claim_rejects_other_currency() {
        let claim = ClaimRecordBuilder::new().with_currency(Currency::USD).build();

        let result = validate_claim(&claim, &RulesFixtures::scheme(), DateFixtures::as_of());

        assert!(matches!(result, Err(RedressError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_validate_claim_rejects_unbounded_amounts() {
        let huge_losses = ClaimRecordBuilder::new()
            .with_consequential_losses(Decimal::MAX)
            .build();
        assert_err_variant!(
            validate_claim(&huge_losses, &RulesFixtures::scheme(), DateFixtures::as_of()),
            RedressError::AmountOutOfRange { .. }
        );

        let huge_commission = ClaimRecordBuilder::new()
            .with_commission(Decimal::MAX, dec!(0.0000000001))
            .build();
        assert_err_variant!(
            validate_claim(&huge_commission, &RulesFixtures::scheme(), DateFixtures::as_of()),
            RedressError::AmountOutOfRange { .. }
        );
    }

    #[test]
    fn test_largest_valid_claim_validates() {
        let claim = ClaimRecordBuilder::new()
            .with_commission(MAX_CLAIM_AMOUNT, dec!(0.0001))
            .with_loan_amount(MAX_CLAIM_AMOUNT)
            .with_consequential_losses(MAX_CLAIM_AMOUNT)
            .with_claimed_amount(MAX_CLAIM_AMOUNT)
            .build();

        let result = validate_claim(&claim, &RulesFixtures::scheme(), DateFixtures::as_of()).unwrap();

        assert!(result.redress_calculation.total.amount() > MAX_CLAIM_AMOUNT);
        assert_eq!(result.eligibility.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn test_validation_serializes_three_sections() {
        let result = validate_claim(&ClaimFixtures::eligible_pcp(), &RulesFixtures::scheme(), DateFixtures::as_of())
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["reference"], "TEST-001");
        assert_eq!(json["eligibility"]["status"], "eligible");
        assert!(json["redress_calculation"]["notes"].is_array());
        assert_eq!(json["amount_comparison"]["assessment"], "claimed_higher");
    }

    #[test]
    fn test_mixed_portfolio() {
        let report = validate_portfolio(
            &ClaimFixtures::mixed_portfolio(),
            &RulesFixtures::scheme(),
            DateFixtures::as_of(),
        );

        assert_eq!(report.summary.total_claims, 6);
        assert_eq!(report.summary.eligible, 1);
        assert_eq!(report.summary.requires_review, 2);
        assert_eq!(report.summary.ineligible, 2);
        assert_eq!(report.summary.rejected, 1);
        assert_eq!(report.summary.total_claimed.amount(), dec!(4500));

        match &report.outcomes[5] {
            ClaimOutcome::Rejected { reference, error } => {
                assert_eq!(reference, "TEST-006");
                assert!(error.contains("loan_amount"));
            }
            other => panic!("Expected rejection, got {:?}", other),
        }
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn evaluation_is_deterministic(claim in claim_record_strategy(), as_of in date_strategy()) {
        let rules = SchemeRules::default();
        prop_assert_eq!(evaluate_as_of(&claim, &rules, as_of), evaluate_as_of(&claim, &rules, as_of));
    }

    #[test]
    fn calculation_is_idempotent(claim in claim_record_strategy(), as_of in date_strategy()) {
        let rules = SchemeRules::default();
        prop_assert_eq!(calculate_as_of(&claim, &rules, as_of), calculate_as_of(&claim, &rules, as_of));
    }

    #[test]
    fn verdict_follows_sub_checks(claim in claim_record_strategy(), as_of in date_strategy()) {
        let result = evaluate_as_of(&claim, &SchemeRules::default(), as_of);
        let critical = result.date_ok && result.product_ok && result.limitation_ok;
        let expected = match (critical, result.commission_ok) {
            (true, true) => EligibilityStatus::Eligible,
            (true, false) => EligibilityStatus::RequiresReview,
            (false, _) => EligibilityStatus::Ineligible,
        };
        prop_assert_eq!(result.status, expected);
        prop_assert!(result.limitation_ok);
    }

    #[test]
    fn redress_never_negative_and_respects_cap(
        claim in claim_record_strategy(),
        cap in 0i64..1_000_000i64,
    ) {
        let rules = SchemeRules::default().with_max_redress_amount(Decimal::from(cap));
        let result = calculate_as_of(&claim, &rules, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());

        prop_assert!(!result.total.is_negative());
        prop_assert!(result.total.amount() <= Decimal::from(cap));
        prop_assert!(!result.statutory_interest.is_negative());
    }
}
