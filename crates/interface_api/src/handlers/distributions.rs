//! Distribution handlers

use axum::{extract::State, Json};

use crate::{AppState, error::ApiError};
use crate::dto::distributions::{DistributionRequest, DistributionResponse};

/// Runs gross proceeds through the priority waterfall
pub async fn distribute(
    State(state): State<AppState>,
    Json(request): Json<DistributionRequest>,
) -> Result<Json<DistributionResponse>, ApiError> {
    let result = state.distributor.distribute_amount(request.gross_proceeds)?;
    Ok(Json(result.into()))
}
