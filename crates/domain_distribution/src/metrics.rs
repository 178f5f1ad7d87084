//! Portfolio returns under a damages-based agreement
//!
//! The DBA fee (a fixed share of the total value of successful claims) is
//! the pot the priority waterfall distributes. The funder's return on that
//! pot is reported as a multiple on invested capital.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::info;

use core_kernel::{Money, MoneyError, Rate};
use crate::error::DistributionError;
use crate::waterfall::{DistributionResult, WaterfallDistributor};

/// DBA fee as a percentage of total claims value
pub const DEFAULT_DBA_RATE_PCT: Decimal = dec!(30);

/// Damages-based agreement terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DbaTerms {
    /// Accepts a fraction (`0.3`) or a percentage (`30`); serialized as a
    /// percentage
    #[serde(
        default = "default_dba_rate",
        deserialize_with = "deserialize_rate",
        serialize_with = "serialize_rate"
    )]
    pub dba_rate: Rate,
}

impl Default for DbaTerms {
    fn default() -> Self {
        Self {
            dba_rate: default_dba_rate(),
        }
    }
}

impl DbaTerms {
    pub fn new(dba_rate: Rate) -> Self {
        Self { dba_rate }
    }
}

fn default_dba_rate() -> Rate {
    Rate::from_percentage(DEFAULT_DBA_RATE_PCT)
}

fn deserialize_rate<'de, D>(deserializer: D) -> Result<Rate, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Decimal>::deserialize(deserializer)?;
    Ok(Rate::coerce_percentage(value, DEFAULT_DBA_RATE_PCT))
}

fn serialize_rate<S>(rate: &Rate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    Serialize::serialize(&rate.as_percentage().normalize(), serializer)
}

/// Portfolio-level aggregates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Total value of successful claims
    pub total_claims_value: Money,
    /// Total capital the funder has invested
    pub total_funded: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total_claims_value: Money,
    pub total_funded: Money,
    pub dba_rate_pct: Decimal,
    pub dba_proceeds: Money,
    pub distribution: DistributionResult,
    /// `funder_share / total_funded`, 0 when nothing was funded
    pub funder_moic: Decimal,
    /// `(funder_share - total_funded) / total_funded * 100`, 0 when nothing
    /// was funded
    pub profit_margin_pct: Decimal,
}

/// Computes DBA proceeds, runs them through the waterfall and reports the
/// funder's returns
pub fn calculate_portfolio_metrics(
    totals: &PortfolioTotals,
    terms: &DbaTerms,
    distributor: &WaterfallDistributor,
) -> Result<PortfolioMetrics, DistributionError> {
    let dba_proceeds = terms.dba_rate.apply(&totals.total_claims_value);
    let distribution = distributor.distribute(dba_proceeds)?;

    let funder_share = distribution.funder_share;
    let funder_moic = funder_share
        .ratio_to(&totals.total_funded)?
        .unwrap_or(Decimal::ZERO);
    let profit_margin_pct = match funder_share
        .checked_sub(&totals.total_funded)?
        .ratio_to(&totals.total_funded)?
    {
        Some(ratio) => ratio.checked_mul(dec!(100)).ok_or(MoneyError::Overflow)?,
        None => Decimal::ZERO,
    };

    info!(
        dba_proceeds = %dba_proceeds,
        funder_moic = %funder_moic.round_dp(2),
        "Portfolio metrics calculated"
    );

    Ok(PortfolioMetrics {
        total_claims_value: totals.total_claims_value,
        total_funded: totals.total_funded,
        dba_rate_pct: terms.dba_rate.as_percentage(),
        dba_proceeds,
        distribution,
        funder_moic,
        profit_margin_pct,
    })
}
