//! Settlement waterfall distribution
//!
//! Proceeds flow through the priority tiers in order, each tier taking at
//! most its nominal amount from what remains:
//!
//! ```text
//! 1. outstanding costs          -> funder
//! 2. first-tier funder return   -> funder
//! 3. distribution cost overrun  -> firm
//! 4. net proceeds               -> funder_fraction to the funder,
//!                                  the rest to the firm, half of which
//!                                  goes on to the claims processor
//! ```
//!
//! The firm's portion of net proceeds is the remainder after the funder's
//! portion, so the three final shares always sum to the gross amount.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::Money;
use crate::error::DistributionError;
use crate::priority::{PriorityRules, PriorityTerms, CLAIMS_PROCESSOR_FRACTION};

/// Waterfall tier a payment was made under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    OutstandingCosts,
    FirstTierFunderReturn,
    DistributionCostsOverrun,
    NetProceeds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    Funder,
    Firm,
    ClaimsProcessor,
}

/// One line of the distribution audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPayment {
    pub tier: Tier,
    pub recipient: Recipient,
    pub amount: Money,
}

/// Breakdown of one distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub gross_proceeds: Money,
    pub outstanding_costs_paid: Money,
    pub first_tier_funder_paid: Money,
    pub distribution_overrun_paid: Money,
    pub net_proceeds: Money,
    pub funder_portion: Money,
    pub firm_portion: Money,
    pub funder_share: Money,
    pub firm_share: Money,
    pub claims_processor_share: Money,
}

impl DistributionResult {
    /// Every payment in waterfall order, including zero payments
    pub fn tier_payments(&self) -> Vec<TierPayment> {
        let firm_final_share = self.firm_portion - self.claims_processor_share;
        [
            (Tier::OutstandingCosts, Recipient::Funder, self.outstanding_costs_paid),
            (Tier::FirstTierFunderReturn, Recipient::Funder, self.first_tier_funder_paid),
            (Tier::DistributionCostsOverrun, Recipient::Firm, self.distribution_overrun_paid),
            (Tier::NetProceeds, Recipient::Funder, self.funder_portion),
            (Tier::NetProceeds, Recipient::Firm, firm_final_share),
            (Tier::NetProceeds, Recipient::ClaimsProcessor, self.claims_processor_share),
        ]
        .into_iter()
        .map(|(tier, recipient, amount)| TierPayment { tier, recipient, amount })
        .collect()
    }

    /// Sum of the three final shares
    pub fn total_distributed(&self) -> Money {
        self.funder_share + self.firm_share + self.claims_processor_share
    }
}

/// Distributes proceeds under a fixed set of priority rules
#[derive(Debug, Clone)]
pub struct WaterfallDistributor {
    rules: PriorityRules,
}

impl WaterfallDistributor {
    /// Creates a distributor, re-checking the rules
    pub fn new(rules: PriorityRules) -> Result<Self, DistributionError> {
        PriorityTerms::from(rules.clone()).validate()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &PriorityRules {
        &self.rules
    }

    /// Runs `gross` through the waterfall
    pub fn distribute(&self, gross: Money) -> Result<DistributionResult, DistributionError> {
        let currency = self.rules.currency();
        if gross.currency() != currency {
            return Err(DistributionError::CurrencyMismatch {
                expected: currency,
                actual: gross.currency(),
            });
        }
        if gross.is_negative() {
            return Err(DistributionError::NegativeProceeds(gross.amount()));
        }

        let mut remaining = gross;
        let mut take = |nominal: Money| -> Result<Money, DistributionError> {
            let paid = remaining.checked_min(&nominal)?;
            remaining = remaining.checked_sub(&paid)?;
            Ok(paid)
        };

        let outstanding_costs_paid = take(self.rules.outstanding_costs_sum())?;
        let first_tier_funder_paid = take(self.rules.first_tier_funder_return())?;
        let distribution_overrun_paid = take(self.rules.distribution_costs_overrun())?;

        let net_proceeds = remaining.non_negative();
        let funder_portion = self.rules.funder_fraction().apply(&net_proceeds);
        let firm_portion = net_proceeds.checked_sub(&funder_portion)?;
        let claims_processor_share = firm_portion.multiply(CLAIMS_PROCESSOR_FRACTION);
        let firm_final_share = firm_portion.checked_sub(&claims_processor_share)?;

        debug!(
            outstanding = %outstanding_costs_paid,
            first_tier = %first_tier_funder_paid,
            overrun = %distribution_overrun_paid,
            net = %net_proceeds,
            "Priority tiers settled"
        );

        let funder_share = outstanding_costs_paid
            .checked_add(&first_tier_funder_paid)?
            .checked_add(&funder_portion)?;
        let firm_share = distribution_overrun_paid.checked_add(&firm_final_share)?;

        info!(
            gross = %gross,
            funder = %funder_share,
            firm = %firm_share,
            claims_processor = %claims_processor_share,
            "Proceeds distributed"
        );

        Ok(DistributionResult {
            gross_proceeds: gross,
            outstanding_costs_paid,
            first_tier_funder_paid,
            distribution_overrun_paid,
            net_proceeds,
            funder_portion,
            firm_portion,
            funder_share,
            firm_share,
            claims_processor_share,
        })
    }

    /// Convenience for a plain amount in the rules' currency
    ///
    /// The amount is rounded to 4 decimal places on the way in, like every
    /// [`Money`]. `gross_proceeds` holds the rounded value and the shares
    /// sum exactly to it.
    pub fn distribute_amount(&self, gross: Decimal) -> Result<DistributionResult, DistributionError> {
        self.distribute(Money::new(gross, self.rules.currency()))
    }
}
