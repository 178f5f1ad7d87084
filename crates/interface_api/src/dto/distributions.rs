//! Distribution DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use domain_distribution::{DistributionResult, TierPayment};

#[derive(Debug, Deserialize)]
pub struct DistributionRequest {
    pub gross_proceeds: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    #[serde(flatten)]
    pub result: DistributionResult,
    pub tier_payments: Vec<TierPayment>,
}

impl From<DistributionResult> for DistributionResponse {
    fn from(result: DistributionResult) -> Self {
        let tier_payments = result.tier_payments();
        Self { result, tier_payments }
    }
}
