//! HTTP API Layer
//!
//! This crate provides the REST API for the redress core using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, distributions, portfolio metrics
//!   and funding agreement compliance
//! - **Middleware**: Request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config)?;
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_distribution::{DbaTerms, LfaTerms, PriorityRules, WaterfallDistributor};
use domain_redress::SchemeRules;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::middleware::audit_middleware;
use crate::handlers::{claims, compliance, distributions, health, portfolio, rules};

/// Application state shared across handlers
///
/// Rules are validated once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub rules: Arc<SchemeRules>,
    pub distributor: Arc<WaterfallDistributor>,
    pub dba: DbaTerms,
    pub lfa: Arc<LfaTerms>,
}

impl AppState {
    /// Validates the configured rules and builds the shared state
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        config.scheme.validate()?;
        if config.batch_chunk_size == 0 {
            return Err(ApiError::Configuration("batch_chunk_size must be at least 1".to_string()));
        }

        let priority = PriorityRules::new(config.priority.clone())?;
        let distributor = WaterfallDistributor::new(priority)?;
        if distributor.rules().currency() != config.scheme.currency {
            return Err(ApiError::Configuration(format!(
                "Priority currency {} differs from scheme currency {}",
                distributor.rules().currency(),
                config.scheme.currency
            )));
        }

        config.lfa.validate()?;
        if config.lfa.currency != config.scheme.currency {
            return Err(ApiError::Configuration(format!(
                "Funding agreement currency {} differs from scheme currency {}",
                config.lfa.currency, config.scheme.currency
            )));
        }

        Ok(Self {
            rules: Arc::new(config.scheme.clone()),
            distributor: Arc::new(distributor),
            dba: config.dba,
            lfa: Arc::new(config.lfa.clone()),
            config,
        })
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let request_id = HeaderName::from_static("x-request-id");

    let public_routes = Router::new().route("/health", get(health::health_check));

    let claims_routes = Router::new()
        .route("/validate", post(claims::validate))
        .route("/eligibility", post(claims::eligibility))
        .route("/redress", post(claims::redress))
        .route("/batch", post(claims::batch));

    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .route("/distributions", post(distributions::distribute))
        .route("/portfolio/metrics", post(portfolio::metrics))
        .route("/compliance", post(compliance::check))
        .route("/rules", get(rules::active_rules))
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
