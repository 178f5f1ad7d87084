//! Funding-priority (waterfall) terms
//!
//! [`PriorityTerms`] is the plain, serializable form read from
//! configuration. [`PriorityRules`] is the validated form the distributor
//! runs on; it can only be built from terms that pass [`PriorityTerms::validate`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, Rate};
use crate::error::DistributionError;

/// Funder's share of net proceeds
pub const DEFAULT_FUNDER_FRACTION: Decimal = dec!(0.8);
/// Firm's share of net proceeds
pub const DEFAULT_FIRM_FRACTION: Decimal = dec!(0.2);
/// Part of the firm's share passed on to the claims processor
pub const CLAIMS_PROCESSOR_FRACTION: Decimal = dec!(0.5);

/// Priority deed terms as configured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityTerms {
    pub outstanding_costs_sum: Decimal,
    pub first_tier_funder_return: Decimal,
    pub distribution_costs_overrun: Decimal,
    pub funder_fraction: Decimal,
    pub firm_fraction: Decimal,
    pub currency: Currency,
}

impl Default for PriorityTerms {
    fn default() -> Self {
        Self {
            outstanding_costs_sum: Decimal::ZERO,
            first_tier_funder_return: Decimal::ZERO,
            distribution_costs_overrun: Decimal::ZERO,
            funder_fraction: DEFAULT_FUNDER_FRACTION,
            firm_fraction: DEFAULT_FIRM_FRACTION,
            currency: Currency::default(),
        }
    }
}

impl PriorityTerms {
    /// Creates terms with the given tier amounts and the default 80/20 split
    pub fn new(
        outstanding_costs_sum: Decimal,
        first_tier_funder_return: Decimal,
        distribution_costs_overrun: Decimal,
    ) -> Self {
        Self {
            outstanding_costs_sum,
            first_tier_funder_return,
            distribution_costs_overrun,
            ..Self::default()
        }
    }

    pub fn with_split(mut self, funder_fraction: Decimal, firm_fraction: Decimal) -> Self {
        self.funder_fraction = funder_fraction;
        self.firm_fraction = firm_fraction;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Validates that tiers are non-negative and the split fractions lie in
    /// `[0, 1]` and sum to exactly 1
    pub fn validate(&self) -> Result<(), DistributionError> {
        let tiers = [
            ("outstanding_costs_sum", self.outstanding_costs_sum),
            ("first_tier_funder_return", self.first_tier_funder_return),
            ("distribution_costs_overrun", self.distribution_costs_overrun),
        ];
        for (tier, value) in tiers {
            if value < Decimal::ZERO {
                return Err(DistributionError::NegativeTier {
                    tier: tier.to_string(),
                    value,
                });
            }
        }

        for (name, fraction) in [("funder_fraction", self.funder_fraction), ("firm_fraction", self.firm_fraction)] {
            if fraction < Decimal::ZERO || fraction > Decimal::ONE {
                return Err(DistributionError::InvalidFractions(format!(
                    "{} must be between 0 and 1, got {}",
                    name, fraction
                )));
            }
        }

        let total = self.funder_fraction + self.firm_fraction;
        if total != Decimal::ONE {
            return Err(DistributionError::InvalidFractions(format!(
                "Fractions must sum to 1, got {}",
                total
            )));
        }

        Ok(())
    }
}

/// Validated priority terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PriorityTerms", into = "PriorityTerms")]
pub struct PriorityRules {
    outstanding_costs_sum: Money,
    first_tier_funder_return: Money,
    distribution_costs_overrun: Money,
    funder_fraction: Rate,
    firm_fraction: Rate,
}

impl PriorityRules {
    /// Validates and converts configured terms
    pub fn new(terms: PriorityTerms) -> Result<Self, DistributionError> {
        terms.validate()?;
        Ok(Self {
            outstanding_costs_sum: Money::new(terms.outstanding_costs_sum, terms.currency),
            first_tier_funder_return: Money::new(terms.first_tier_funder_return, terms.currency),
            distribution_costs_overrun: Money::new(terms.distribution_costs_overrun, terms.currency),
            funder_fraction: Rate::new(terms.funder_fraction),
            firm_fraction: Rate::new(terms.firm_fraction),
        })
    }

    pub fn outstanding_costs_sum(&self) -> Money {
        self.outstanding_costs_sum
    }

    pub fn first_tier_funder_return(&self) -> Money {
        self.first_tier_funder_return
    }

    pub fn distribution_costs_overrun(&self) -> Money {
        self.distribution_costs_overrun
    }

    pub fn funder_fraction(&self) -> Rate {
        self.funder_fraction
    }

    pub fn firm_fraction(&self) -> Rate {
        self.firm_fraction
    }

    pub fn currency(&self) -> Currency {
        self.outstanding_costs_sum.currency()
    }
}

impl Default for PriorityRules {
    fn default() -> Self {
        let terms = PriorityTerms::default();
        let currency = terms.currency;
        Self {
            outstanding_costs_sum: Money::zero(currency),
            first_tier_funder_return: Money::zero(currency),
            distribution_costs_overrun: Money::zero(currency),
            funder_fraction: Rate::new(terms.funder_fraction),
            firm_fraction: Rate::new(terms.firm_fraction),
        }
    }
}

impl TryFrom<PriorityTerms> for PriorityRules {
    type Error = DistributionError;

    fn try_from(terms: PriorityTerms) -> Result<Self, Self::Error> {
        Self::new(terms)
    }
}

impl From<PriorityRules> for PriorityTerms {
    fn from(rules: PriorityRules) -> Self {
        Self {
            outstanding_costs_sum: rules.outstanding_costs_sum.amount(),
            first_tier_funder_return: rules.first_tier_funder_return.amount(),
            distribution_costs_overrun: rules.distribution_costs_overrun.amount(),
            funder_fraction: rules.funder_fraction.as_decimal(),
            firm_fraction: rules.firm_fraction.as_decimal(),
            currency: rules.currency(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_split() {
        let rules = PriorityRules::default();
        assert_eq!(rules.funder_fraction().as_percentage(), dec!(80));
        assert_eq!(rules.firm_fraction().as_percentage(), dec!(20));
        assert!(rules.outstanding_costs_sum().is_zero());
        assert_eq!(rules.currency(), Currency::GBP);
    }

    #[test]
    fn test_fractions_must_sum_to_one() {
        let terms = PriorityTerms::default().with_split(dec!(0.8), dec!(0.3));
        assert!(matches!(
            PriorityRules::new(terms),
            Err(DistributionError::InvalidFractions(_))
        ));
    }

    #[test]
    fn test_fraction_out_of_range() {
        let terms = PriorityTerms::default().with_split(dec!(1.2), dec!(-0.2));
        assert!(matches!(
            PriorityRules::new(terms),
            Err(DistributionError::InvalidFractions(_))
        ));
    }

    #[test]
    fn test_negative_tier_rejected() {
        let terms = PriorityTerms::new(dec!(-1), dec!(0), dec!(0));
        match PriorityRules::new(terms) {
            Err(DistributionError::NegativeTier { tier, .. }) => assert_eq!(tier, "outstanding_costs_sum"),
            other => panic!("Expected NegativeTier, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: PriorityRules = serde_json::from_value(json!({
            "outstanding_costs_sum": "20000",
            "first_tier_funder_return": 10000,
            "funder_fraction": "0.7",
            "firm_fraction": "0.3"
        }))
        .unwrap();
        assert_eq!(ok.outstanding_costs_sum().amount(), dec!(20000));
        assert_eq!(ok.firm_fraction().as_decimal(), dec!(0.3));

        let bad = serde_json::from_value::<PriorityRules>(json!({ "funder_fraction": "0.9" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_serializes_as_terms() {
        let rules = PriorityRules::new(PriorityTerms::new(dec!(20000), dec!(10000), dec!(5000))).unwrap();
        let terms: PriorityTerms = serde_json::from_value(serde_json::to_value(&rules).unwrap()).unwrap();
        assert_eq!(terms.distribution_costs_overrun, dec!(5000));
        assert_eq!(terms.funder_fraction, dec!(0.8));
    }
}
