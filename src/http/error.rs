//! API error type mapping to HTTP status codes and the `{"error": ...}` body

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use validator::ValidationErrors;

use crate::service::ServiceError;

#[derive(Debug)]
pub enum ApiError {
    /// Input that could not be parsed at all (400)
    BadRequest(String),
    /// Parsed input that breaks a rule (422)
    Validation(String),
    NotFound,
    Internal,
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            tracing::warn!(error = %err, "subscription not found");
            return ApiError::NotFound;
        }

        tracing::error!(error = %err, "subscription service failure");
        ApiError::Internal
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        tracing::warn!(error = %err, "request validation failed");
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
