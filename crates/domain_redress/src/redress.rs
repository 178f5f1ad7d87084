//! Scheme redress calculation
//!
//! Computes what the scheme itself would pay on a claim, independent of the
//! amount claimed:
//!
//! ```text
//! base      = commission * 0.5
//! interest  = base * rate/100 * years_elapsed
//! total     = base + interest + distress award + consequential losses
//! ```
//!
//! The total is capped at the scheme maximum when one is configured. The
//! components are reported as computed; only the total is capped.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{parse_claim_date, years_between, Money, Rate};
use crate::claim::ClaimRecord;
use crate::rules::SchemeRules;

/// Fixed distress and inconvenience award per claim
pub const STANDARD_DISTRESS_AWARD: Decimal = dec!(150);

/// Share of the commission returned to the customer
pub const BASE_COMMISSION_SHARE: Decimal = dec!(0.5);

/// Breakdown of the scheme's redress for one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedressCalculation {
    pub base_amount: Money,
    pub statutory_interest: Money,
    pub distress_award: Money,
    pub consequential_losses: Money,
    pub total: Money,
    /// Years of interest applied; `None` when the agreement date was unusable
    pub years_elapsed: Option<Decimal>,
    /// Whether the total was reduced to the scheme maximum
    pub capped: bool,
    /// Arithmetic steps, in order
    pub notes: Vec<String>,
}

/// Calculates redress with interest running to today's UTC date
pub fn calculate(claim: &ClaimRecord, rules: &SchemeRules) -> RedressCalculation {
    calculate_as_of(claim, rules, Utc::now().date_naive())
}

/// Calculates redress with interest running to `as_of`
pub fn calculate_as_of(claim: &ClaimRecord, rules: &SchemeRules, as_of: NaiveDate) -> RedressCalculation {
    let currency = claim.currency;
    let mut notes = Vec::new();

    let commission = claim.commission();
    let base_amount = commission.multiply(BASE_COMMISSION_SHARE);
    notes.push(format!(
        "Base redress: 50% of commission ({}) = {}",
        commission, base_amount
    ));

    let rate = Rate::from_percentage(rules.statutory_interest_rate_pct);
    let agreement = claim.agreement_date.as_deref().map(parse_claim_date);
    let (statutory_interest, years_elapsed) = match agreement {
        Some(Ok(date)) => {
            let years = years_between(date, as_of).max(Decimal::ZERO);
            let interest = rate.apply(&base_amount).multiply(years);
            notes.push(format!(
                "Statutory interest: {} p.a. over {:.1} years = {}",
                rate,
                years.round_dp(1),
                interest
            ));
            (interest, Some(years))
        }
        Some(Err(err)) => {
            notes.push(format!("Could not calculate statutory interest: agreement {}", err));
            (Money::zero(currency), None)
        }
        None => {
            notes.push("Could not calculate statutory interest: agreement date not provided".to_string());
            (Money::zero(currency), None)
        }
    };

    let distress_award = Money::new(STANDARD_DISTRESS_AWARD, currency);
    notes.push(format!("Distress & inconvenience: {} (standard award)", distress_award));

    let consequential_losses = claim.consequential();
    if consequential_losses.is_positive() {
        notes.push(format!("Consequential losses: {}", consequential_losses));
    }

    let uncapped = Money::new(
        base_amount
            .amount()
            .saturating_add(statutory_interest.amount())
            .saturating_add(distress_award.amount())
            .saturating_add(consequential_losses.amount()),
        currency,
    );

    let (total, capped) = match rules.max_redress_amount {
        Some(cap) if uncapped.amount() > cap => {
            let cap = Money::new(cap, currency);
            notes.push(format!(
                "Total {} capped at scheme maximum: {}",
                uncapped, cap
            ));
            (cap, true)
        }
        _ => (uncapped, false),
    };
    notes.push(format!("Total redress: {}", total));

    debug!(reference = %claim.reference, ?years_elapsed, capped, "Redress components computed");
    info!(reference = %claim.reference, total = %total, "Redress calculated");

    RedressCalculation {
        base_amount,
        statutory_interest,
        distress_award,
        consequential_losses,
        total,
        years_elapsed,
        capped,
        notes,
    }
}
