//! Redress Domain - Scheme eligibility and redress calculation
//!
//! This crate evaluates individual finance-commission claims against a
//! regulatory redress scheme:
//! - Eligibility (agreement window, product, commission threshold, limitation)
//! - The scheme's own redress amount, with statutory interest
//! - Comparison of the claimed amount against that calculation
//! - Batch validation of a whole portfolio
//!
//! Every operation is a pure function of a [`ClaimRecord`] and an immutable
//! [`SchemeRules`]; nothing here performs I/O.

pub mod claim;
pub mod rules;
pub mod eligibility;
pub mod redress;
pub mod comparison;
pub mod validation;
pub mod batch;
pub mod error;

pub use claim::{derive_commission_pct, ClaimRecord, ProductType, MAX_CLAIM_AMOUNT};
pub use rules::SchemeRules;
pub use eligibility::{evaluate, evaluate_as_of, EligibilityResult, EligibilityStatus};
pub use redress::{calculate, calculate_as_of, RedressCalculation, STANDARD_DISTRESS_AWARD};
pub use comparison::{compare_amounts, AmountAssessment, AmountComparison};
pub use validation::{validate_claim, ClaimValidation};
pub use batch::{validate_outcomes, validate_portfolio, ClaimOutcome, PortfolioSummary, PortfolioValidation};
pub use error::RedressError;
