//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": {
            "code": "INTERNAL_ERROR",
            "message": "An internal server error occurred"
        }
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": {
            "code": "VALIDATION_ERROR",
            "message": "Request validation failed",
            "details": [{
                "field": "pageSize",
                "code": "one_of",
                "message": "Page size must be 12, 24, 36, or 48",
                "params": {"value": "50"}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": {
            "code": "NOT_FOUND",
            "message": "Product not found"
        }
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
