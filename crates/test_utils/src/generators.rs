//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{Currency, Money, CLAIM_DATE_FORMATS};
use domain_distribution::PriorityTerms;
use domain_redress::ClaimRecord;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for non-negative amounts with pence precision (0 to 10m)
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|pence| Decimal::new(pence, 2))
}

/// Strategy for strictly positive amounts with pence precision
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|pence| Decimal::new(pence, 2))
}

/// Strategy for non-negative GBP amounts
pub fn gbp_money_strategy() -> impl Strategy<Value = Money> {
    amount_strategy().prop_map(|amount| Money::new(amount, Currency::GBP))
}

/// Strategy for fractions in `[0, 1]` with four decimal places
pub fn fraction_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 4))
}

/// Strategy for percentages in `[0, 100]` with two decimal places
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for dates between 2000-01-01 and roughly 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..11_000i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for a date rendered in one of the accepted claim formats
pub fn claim_date_text_strategy() -> impl Strategy<Value = (NaiveDate, String)> {
    (date_strategy(), 0usize..CLAIM_DATE_FORMATS.len())
        .prop_map(|(date, fmt)| (date, date.format(CLAIM_DATE_FORMATS[fmt]).to_string()))
}

/// Strategy for product labels, including long forms, odd casing and
/// unknown products
pub fn product_label_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("PCP".to_string())),
        Just(Some("hp".to_string())),
        Just(Some("Conditional Sale".to_string())),
        Just(Some(" personal contract hire ".to_string())),
        Just(Some("Personal Loan".to_string())),
        Just(Some(String::new())),
    ]
}

/// Strategy for well-formed, non-negative claim records
pub fn claim_record_strategy() -> impl Strategy<Value = ClaimRecord> {
    (
        claim_date_text_strategy(),
        proptest::option::of(date_strategy()),
        product_label_strategy(),
        amount_strategy(),
        amount_strategy(),
        amount_strategy(),
        proptest::option::of(any::<bool>()),
        proptest::option::of(amount_strategy()),
        amount_strategy(),
    )
        .prop_map(
            |(
                (_, agreement),
                submission,
                product,
                commission,
                cost_of_credit,
                loan,
                disclosure,
                claimed,
                consequential,
            )| {
                let mut record = ClaimRecord::new("PROP-CLAIM");
                record.agreement_date = Some(agreement);
                record.submission_date = submission.map(|d| d.format("%Y-%m-%d").to_string());
                record.product_type = product;
                record.commission_amount = commission;
                record.total_cost_of_credit = cost_of_credit;
                record.loan_amount = loan;
                record.disclosure_adequate = disclosure;
                record.claimed_amount = claimed;
                record.consequential_losses = consequential;
                record
            },
        )
}

/// Strategy for valid priority terms: non-negative tiers and fractions
/// summing to exactly 1
pub fn priority_terms_strategy() -> impl Strategy<Value = PriorityTerms> {
    (amount_strategy(), amount_strategy(), amount_strategy(), fraction_strategy()).prop_map(
        |(outstanding, first_tier, overrun, funder_fraction)| {
            PriorityTerms::new(outstanding, first_tier, overrun)
                .with_split(funder_fraction, Decimal::ONE - funder_fraction)
        },
    )
}
