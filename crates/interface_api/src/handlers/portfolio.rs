//! Portfolio handlers

use axum::{extract::State, Json};

use core_kernel::{Money, Rate};
use domain_distribution::{calculate_portfolio_metrics, DbaTerms, PortfolioMetrics, PortfolioTotals};

use crate::{AppState, error::ApiError};
use crate::dto::portfolio::PortfolioMetricsRequest;

/// DBA proceeds, funder distribution and MOIC for a portfolio
pub async fn metrics(
    State(state): State<AppState>,
    Json(request): Json<PortfolioMetricsRequest>,
) -> Result<Json<PortfolioMetrics>, ApiError> {
    let currency = state.distributor.rules().currency();
    let totals = PortfolioTotals {
        total_claims_value: Money::new(request.total_claims_value, currency),
        total_funded: Money::new(request.total_funded, currency),
    };
    if totals.total_claims_value.is_negative() || totals.total_funded.is_negative() {
        return Err(ApiError::Validation("Portfolio totals must not be negative".to_string()));
    }

    let terms = match request.dba_rate {
        Some(rate) => DbaTerms::new(Rate::coerce_percentage(Some(rate), state.dba.dba_rate.as_percentage())),
        None => state.dba,
    };

    Ok(Json(calculate_portfolio_metrics(&totals, &terms, &state.distributor)?))
}
