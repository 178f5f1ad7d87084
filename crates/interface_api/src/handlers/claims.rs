//! Claims handlers

use std::sync::Arc;

use axum::{extract::{Query, State}, Json};
use chrono::NaiveDate;
use tracing::debug;

use domain_redress::{
    calculate_as_of, evaluate_as_of, validate_claim, validate_outcomes, ClaimRecord, ClaimValidation,
    EligibilityResult, PortfolioValidation, RedressCalculation,
};

use crate::{AppState, error::ApiError};
use crate::dto::claims::AsOfQuery;

fn as_of(state: &AppState, query: &AsOfQuery) -> NaiveDate {
    query.as_of.unwrap_or_else(|| state.config.timezone.today())
}

/// Runs eligibility, redress and amount comparison for one claim
pub async fn validate(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    Json(claim): Json<ClaimRecord>,
) -> Result<Json<ClaimValidation>, ApiError> {
    let as_of = as_of(&state, &query);
    Ok(Json(validate_claim(&claim, &state.rules, as_of)?))
}

/// Evaluates eligibility only
pub async fn eligibility(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    Json(claim): Json<ClaimRecord>,
) -> Result<Json<EligibilityResult>, ApiError> {
    claim.validate()?;
    let as_of = as_of(&state, &query);
    Ok(Json(evaluate_as_of(&claim, &state.rules, as_of)))
}

/// Calculates the scheme redress only
pub async fn redress(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    Json(claim): Json<ClaimRecord>,
) -> Result<Json<RedressCalculation>, ApiError> {
    claim.validate()?;
    let as_of = as_of(&state, &query);
    Ok(Json(calculate_as_of(&claim, &state.rules, as_of)))
}

/// Validates a batch of claims
///
/// The batch is split into chunks, each validated on a blocking worker;
/// outcomes are reassembled in input order.
pub async fn batch(
    State(state): State<AppState>,
    Query(query): Query<AsOfQuery>,
    Json(claims): Json<Vec<ClaimRecord>>,
) -> Result<Json<PortfolioValidation>, ApiError> {
    let as_of = as_of(&state, &query);
    let chunk_size = state.config.batch_chunk_size;

    let workers: Vec<_> = claims
        .chunks(chunk_size)
        .map(|chunk| {
            let chunk = chunk.to_vec();
            let rules = Arc::clone(&state.rules);
            tokio::task::spawn_blocking(move || validate_outcomes(&chunk, &rules, as_of))
        })
        .collect();
    debug!(claims = claims.len(), workers = workers.len(), "Batch dispatched");

    let mut outcomes = Vec::with_capacity(claims.len());
    for worker in workers {
        outcomes.extend(worker.await?);
    }

    Ok(Json(PortfolioValidation::from_outcomes(outcomes, &state.rules, as_of)))
}
