//! Error handling and HTTP error conversion
//!
//! Reconciliation errors are mapped to HTTP responses here. Internal details
//! of server side failures are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hubconf_core::HubConfError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,
}

/// Errors returned by the handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is not a usable GitHub event.
    #[error("Missing data on request, are you a GitHub hook event? {0}")]
    BadRequest(String),

    /// The event signature is missing or does not match the secret.
    #[error("Invalid webhook signature")]
    InvalidSignature,

    /// The repository configuration file cannot be parsed.
    #[error("Invalid repository configuration: {0}")]
    InvalidConfig(String),

    /// Reading or updating the repository failed.
    #[error(transparent)]
    Reconcile(#[from] HubConfError),
}

impl ApiError {
    /// HTTP status and machine-readable code for this error.
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            ApiError::InvalidSignature => (StatusCode::UNAUTHORIZED, "InvalidSignature"),
            ApiError::InvalidConfig(_) => (StatusCode::UNPROCESSABLE_ENTITY, "InvalidConfig"),
            ApiError::Reconcile(HubConfError::Validation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ValidationError")
            }
            ApiError::Reconcile(HubConfError::Unsupported(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UnsupportedOperation")
            }
            ApiError::Reconcile(HubConfError::Transport(_)) => {
                (StatusCode::BAD_GATEWAY, "GitHubError")
            }
            ApiError::Reconcile(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        log_error(&self, status);

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "An internal error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    match status {
        StatusCode::INTERNAL_SERVER_ERROR | StatusCode::BAD_GATEWAY => {
            tracing::error!("API error: {} - {}", status, error);
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            tracing::warn!("API error: {} - {}", status, error);
        }
        _ => {
            tracing::info!("API error: {} - {}", status, error);
        }
    }
}
