//! Compliance handlers

use axum::{extract::State, Json};

use domain_distribution::{check_lfa_compliance, ComplianceReport, FundedClaim};

use crate::{AppState, error::ApiError};

/// Checks one funded claim against the configured funding agreement
pub async fn check(
    State(state): State<AppState>,
    Json(claim): Json<FundedClaim>,
) -> Result<Json<ComplianceReport>, ApiError> {
    Ok(Json(check_lfa_compliance(&claim, &state.lfa)?))
}
