//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::Money;
use domain_distribution::DistributionResult;
use domain_redress::EligibilityResult;
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that money values sum exactly to a total
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = parts.iter().fold(Money::zero(total.currency()), |acc, m| {
        acc.checked_add(m).expect("Currency mismatch in sum")
    });

    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) doesn't equal total ({})",
        sum.amount(),
        total.amount()
    );
}

/// Asserts the distribution invariants: the three final shares sum to the
/// gross and no payment is negative
pub fn assert_distribution_conserves(result: &DistributionResult) {
    assert_money_sum_equals(
        &[result.funder_share, result.firm_share, result.claims_processor_share],
        &result.gross_proceeds,
    );

    for payment in result.tier_payments() {
        assert!(
            !payment.amount.is_negative(),
            "Negative payment {} to {:?} under {:?}",
            payment.amount,
            payment.recipient,
            payment.tier
        );
    }
}

/// Asserts that some reason starts with `prefix`
pub fn assert_has_reason(result: &EligibilityResult, prefix: &str) {
    assert!(
        result.reasons.iter().any(|r| r.starts_with(prefix)),
        "No reason starting with {:?} in {:?}",
        prefix,
        result.reasons
    );
}

/// Asserts that some warning contains `fragment`
pub fn assert_has_warning(result: &EligibilityResult, fragment: &str) {
    assert!(
        result.warnings.iter().any(|w| w.contains(fragment)),
        "No warning containing {:?} in {:?}",
        fragment,
        result.warnings
    );
}

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
