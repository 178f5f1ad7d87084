//! Redress scheme configuration
//!
//! [`SchemeRules`] collects every tunable parameter of the scheme in one
//! immutable value. The defaults below are the scheme's published terms;
//! callers override them explicitly rather than through ambient state.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Currency;
use crate::claim::{ProductType, MAX_CLAIM_AMOUNT};
use crate::error::RedressError;

/// First agreement date covered by the scheme
pub const DEFAULT_MIN_AGREEMENT_DATE: (i32, u32, u32) = (2007, 4, 6);
/// Last agreement date covered by the scheme
pub const DEFAULT_MAX_AGREEMENT_DATE: (i32, u32, u32) = (2021, 1, 28);
/// Commission share of the cost of credit at which non-disclosure is
/// presumed unfair
pub const DEFAULT_PLEVIN_THRESHOLD_PCT: Decimal = dec!(50.0);
pub const DEFAULT_LIMITATION_PERIOD_YEARS: u32 = 6;
pub const DEFAULT_KNOWLEDGE_PERIOD_YEARS: u32 = 3;
pub const DEFAULT_STATUTORY_INTEREST_RATE_PCT: Decimal = dec!(8.0);
/// Loans below this value draw a low-value warning
pub const DEFAULT_LOW_VALUE_LOAN_FLOOR: Decimal = dec!(1000);

/// Immutable scheme eligibility and calculation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeRules {
    /// Earliest eligible agreement date (inclusive)
    pub min_date: NaiveDate,
    /// Latest eligible agreement date (inclusive)
    pub max_date: NaiveDate,
    pub plevin_threshold_pct: Decimal,
    pub limitation_period_years: u32,
    /// Years from date of knowledge, cited when the limitation period is exceeded
    pub knowledge_period_years: u32,
    pub statutory_interest_rate_pct: Decimal,
    pub eligible_product_types: BTreeSet<ProductType>,
    /// Cap on total redress; `None` is unbounded
    pub max_redress_amount: Option<Decimal>,
    pub low_value_loan_floor: Decimal,
    /// Currency of the cap and of every claim assessed under these rules
    pub currency: Currency,
}

impl Default for SchemeRules {
    fn default() -> Self {
        Self {
            min_date: ymd(DEFAULT_MIN_AGREEMENT_DATE),
            max_date: ymd(DEFAULT_MAX_AGREEMENT_DATE),
            plevin_threshold_pct: DEFAULT_PLEVIN_THRESHOLD_PCT,
            limitation_period_years: DEFAULT_LIMITATION_PERIOD_YEARS,
            knowledge_period_years: DEFAULT_KNOWLEDGE_PERIOD_YEARS,
            statutory_interest_rate_pct: DEFAULT_STATUTORY_INTEREST_RATE_PCT,
            eligible_product_types: [
                ProductType::Pcp,
                ProductType::Hp,
                ProductType::Cs,
                ProductType::Pch,
            ]
            .into_iter()
            .collect(),
            max_redress_amount: None,
            low_value_loan_floor: DEFAULT_LOW_VALUE_LOAN_FLOOR,
            currency: Currency::GBP,
        }
    }
}

fn ymd((y, m, d): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

impl SchemeRules {
    /// Sets the eligible agreement-date window
    pub fn with_window(mut self, min_date: NaiveDate, max_date: NaiveDate) -> Self {
        self.min_date = min_date;
        self.max_date = max_date;
        self
    }

    pub fn with_plevin_threshold(mut self, pct: Decimal) -> Self {
        self.plevin_threshold_pct = pct;
        self
    }

    pub fn with_max_redress_amount(mut self, cap: Decimal) -> Self {
        self.max_redress_amount = Some(cap);
        self
    }

    pub fn with_eligible_products(mut self, products: impl IntoIterator<Item = ProductType>) -> Self {
        self.eligible_product_types = products.into_iter().collect();
        self
    }

    /// Whether `date` falls inside the inclusive eligibility window
    pub fn window_contains(&self, date: NaiveDate) -> bool {
        self.min_date <= date && date <= self.max_date
    }

    /// Comma-separated eligible product codes, in a stable order
    pub fn eligible_product_list(&self) -> String {
        self.eligible_product_types
            .iter()
            .map(ProductType::code)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), RedressError> {
        if self.min_date > self.max_date {
            return Err(RedressError::InvalidRules(format!(
                "eligibility window starts {} after it ends {}",
                self.min_date, self.max_date
            )));
        }

        let non_negative = [
            ("plevin_threshold_pct", Some(self.plevin_threshold_pct)),
            ("statutory_interest_rate_pct", Some(self.statutory_interest_rate_pct)),
            ("low_value_loan_floor", Some(self.low_value_loan_floor)),
            ("max_redress_amount", self.max_redress_amount),
        ];
        for (field, value) in non_negative {
            if matches!(value, Some(v) if v < Decimal::ZERO) {
                return Err(RedressError::InvalidRules(format!("{} must not be negative", field)));
            }
        }

        if self.statutory_interest_rate_pct > dec!(100) {
            return Err(RedressError::InvalidRules(
                "statutory_interest_rate_pct must not exceed 100".to_string(),
            ));
        }
        let amounts = [
            ("low_value_loan_floor", Some(self.low_value_loan_floor)),
            ("max_redress_amount", self.max_redress_amount),
        ];
        for (field, value) in amounts {
            if matches!(value, Some(v) if v > MAX_CLAIM_AMOUNT) {
                return Err(RedressError::InvalidRules(format!(
                    "{} must not exceed {}",
                    field, MAX_CLAIM_AMOUNT
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let rules = SchemeRules::default();
        assert_eq!(rules.min_date, NaiveDate::from_ymd_opt(2007, 4, 6).unwrap());
        assert_eq!(rules.max_date, NaiveDate::from_ymd_opt(2021, 1, 28).unwrap());
        assert_eq!(rules.plevin_threshold_pct, dec!(50));
        assert_eq!(rules.limitation_period_years, 6);
        assert_eq!(rules.statutory_interest_rate_pct, dec!(8));
        assert_eq!(rules.max_redress_amount, None);
        assert_eq!(rules.eligible_product_list(), "PCP, HP, CS, PCH");
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_window_is_inclusive() {
        let rules = SchemeRules::default();
        assert!(rules.window_contains(rules.min_date));
        assert!(rules.window_contains(rules.max_date));
        assert!(!rules.window_contains(rules.min_date.pred_opt().unwrap()));
        assert!(!rules.window_contains(rules.max_date.succ_opt().unwrap()));
    }

    #[test]
    fn test_partial_override_from_json() {
        let rules: SchemeRules = serde_json::from_value(json!({
            "plevin_threshold_pct": "40",
            "max_redress_amount": "10000",
            "eligible_product_types": ["PCP", "Hire Purchase"]
        }))
        .unwrap();

        assert_eq!(rules.plevin_threshold_pct, dec!(40));
        assert_eq!(rules.max_redress_amount, Some(dec!(10000)));
        assert_eq!(rules.eligible_product_list(), "PCP, HP");
        assert_eq!(rules.limitation_period_years, DEFAULT_LIMITATION_PERIOD_YEARS);
    }

    #[test]
    fn test_validate_rejects_inverted_window() {
        let rules = SchemeRules::default().with_window(
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        );
        assert!(matches!(rules.validate(), Err(RedressError::InvalidRules(_))));
    }

    #[test]
    fn test_validate_rejects_negative_cap() {
        let rules = SchemeRules::default().with_max_redress_amount(dec!(-1));
        assert!(matches!(rules.validate(), Err(RedressError::InvalidRules(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let rules = SchemeRules::default().with_max_redress_amount(Decimal::MAX);
        assert!(matches!(rules.validate(), Err(RedressError::InvalidRules(_))));

        let rules = SchemeRules {
            statutory_interest_rate_pct: dec!(101),
            ..SchemeRules::default()
        };
        assert!(matches!(rules.validate(), Err(RedressError::InvalidRules(_))));
    }
}
