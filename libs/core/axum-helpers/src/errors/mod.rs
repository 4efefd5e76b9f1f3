pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Error payload nested inside [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error identifier for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Standard error envelope returned for every error response.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": false,
///   "error": {
///     "code": "VALIDATION_ERROR",
///     "message": "Request validation failed",
///     "details": [{ "field": "pageSize", "code": "one_of", "message": "...", "params": {} }]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false` for errors
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code,
                message: message.into(),
                details,
            },
        }
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Extractor rejections are client errors and render as `VALIDATION_ERROR`
/// with the rejection text in `details`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Query extraction error: {0}")]
    QueryExtractorRejection(#[from] QueryRejection),

    #[error("Path extraction error: {0}")]
    PathExtractorRejection(#[from] PathRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

/// Flatten `ValidationErrors` into a list of field-level violations.
///
/// Entries are ordered by field name so the payload is stable across calls.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let mut entries: Vec<(String, Value)> = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for err in field_errors.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| err.code.to_string());
            entries.push((
                field.to_string(),
                serde_json::json!({
                    "field": field.to_string(),
                    "code": err.code,
                    "message": message,
                    "params": err.params,
                }),
            ));
        }
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Value::Array(entries.into_iter().map(|(_, v)| v).collect())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::JsonExtractorRejection(e) => malformed_request("body", e.body_text()),
            AppError::QueryExtractorRejection(e) => malformed_request("query", e.body_text()),
            AppError::PathExtractorRejection(e) => malformed_request("path", e.body_text()),
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {:?}",
                    e
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(validation_details(&e)),
                    ErrorCode::ValidationError,
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                // Detail stays in the log; the client gets the generic message.
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        (status, Json(ErrorResponse::new(code, message, details))).into_response()
    }
}

/// Status, message, details and code for a request the extractors could not parse.
fn malformed_request(
    location: &str,
    reason: String,
) -> (StatusCode, String, Option<Value>, ErrorCode) {
    tracing::info!(
        error_code = ErrorCode::ValidationError.code(),
        location,
        "Malformed request: {}",
        reason
    );
    let details = serde_json::json!([{
        "field": location,
        "code": "malformed",
        "message": reason,
    }]);
    (
        StatusCode::BAD_REQUEST,
        ErrorCode::ValidationError.default_message().to_string(),
        Some(details),
        ErrorCode::ValidationError,
    )
}

/// Helper function to create error responses outside of `AppError`.
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message, None))).into_response()
}
