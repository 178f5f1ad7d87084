//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_distribution::DistributionError;
use domain_redress::RedressError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", msg.clone()),
            ApiError::Configuration(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error", msg.clone())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone()),
        };

        if status.is_server_error() {
            tracing::error!(error = %message, "Request failed");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RedressError> for ApiError {
    fn from(err: RedressError) -> Self {
        match err {
            RedressError::Money(_) => ApiError::BadRequest(err.to_string()),
            RedressError::InvalidRules(_) => ApiError::Configuration(err.to_string()),
            _ => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<DistributionError> for ApiError {
    fn from(err: DistributionError) -> Self {
        match err {
            DistributionError::InvalidFractions(_)
            | DistributionError::NegativeTier { .. }
            | DistributionError::InvalidTerms(_) => {
                ApiError::Configuration(err.to_string())
            }
            DistributionError::Money(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Batch worker failed: {}", err))
    }
}
