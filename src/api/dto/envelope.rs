//! Uniform response envelope.
//!
//! Every endpoint replies with `{code, message}` plus either `data` on
//! success paths or `errors` on validation failures, never both.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ErrorCode;

/// Response envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": 20000,
    "message": "Success",
    "data": {}
}))]
pub struct ApiResponse<T> {
    /// Numeric response code
    #[schema(example = 20000)]
    pub code: u32,
    /// Display message of `code`
    #[schema(example = "Success")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Validation failures rendered as sentences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

/// Placeholder payload for envelopes that carry no data.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Empty {}

impl<T> ApiResponse<T> {
    pub fn with_data(code: ErrorCode, data: T) -> Self {
        Self {
            code: code.as_u32(),
            message: code.message().to_string(),
            data: Some(data),
            errors: None,
        }
    }
}

impl ApiResponse<Empty> {
    pub fn with_errors(code: ErrorCode, errors: Vec<String>) -> Self {
        Self {
            code: code.as_u32(),
            message: code.message().to_string(),
            data: None,
            errors: (!errors.is_empty()).then_some(errors),
        }
    }
}

/// Success envelope `{code, message, data}` with an explicit status.
pub fn success<T: Serialize>(status: StatusCode, code: ErrorCode, data: T) -> Response {
    (status, Json(ApiResponse::with_data(code, data))).into_response()
}

/// Error envelope `{code, message, errors}` with the status derived from
/// the code's range. `errors` is omitted when no details are given.
pub fn error(code: ErrorCode, details: Vec<String>) -> Response {
    (code.http_status(), Json(ApiResponse::with_errors(code, details))).into_response()
}

/// Error envelope that always answers 404 regardless of the code's range.
pub fn not_found(code: ErrorCode) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::with_errors(code, Vec::new())),
    )
        .into_response()
}
