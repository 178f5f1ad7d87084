//! Portfolio DTOs

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PortfolioMetricsRequest {
    pub total_claims_value: Decimal,
    #[serde(default)]
    pub total_funded: Decimal,
    /// Overrides the configured DBA rate; a fraction or a percentage
    #[serde(default)]
    pub dba_rate: Option<Decimal>,
}
