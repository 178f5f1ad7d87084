//! Rules handlers

use axum::{extract::State, Json};

use crate::AppState;
use crate::dto::rules::RulesResponse;

/// Returns the scheme, priority, DBA and funding agreement terms in force
pub async fn active_rules(State(state): State<AppState>) -> Json<RulesResponse> {
    Json(RulesResponse {
        scheme: state.rules.as_ref().clone(),
        priority: state.distributor.rules().clone(),
        dba: state.dba,
        lfa: state.lfa.as_ref().clone(),
    })
}
