//! Error handler for converting AppError to HTTP responses.
//!
//! Every failure ends in exactly one envelope. Server-side causes are logged
//! here and replaced by the generic internal error message.

use axum::{
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::dto;
use crate::error::{AppError, ErrorCode};

impl IntoResponse for AppError {
    /// # Mapping
    /// - BadRequest → 400 / 40000
    /// - Validation → 400 / 40001 with one `errors` entry per field
    /// - InvalidObjectId → 400 / 40001
    /// - QueryParamInvalid → 400 / 40002
    /// - NotFound → 404 / 40401
    /// - Database, Timeout, Configuration, Internal → 500 / 50000
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!(error = ?self, "Request failed with internal error");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        match &self {
            AppError::NotFound { .. } => dto::not_found(self.code()),
            AppError::Validation { errors } => dto::error(
                self.code(),
                errors.iter().map(|e| e.message()).collect(),
            ),
            _ => dto::error(self.code(), Vec::new()),
        }
    }
}

/// Rewrites framework-generated error responses (unmatched routes, wrong
/// methods, timeouts) into the envelope. JSON responses pass through.
pub async fn envelope_fallback(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    if is_json {
        return response;
    }

    let code = match status {
        StatusCode::NOT_FOUND => return dto::not_found(ErrorCode::NotFound),
        s if s.is_client_error() => ErrorCode::BadRequest,
        _ => ErrorCode::InternalError,
    };
    let mut envelope = dto::error(code, Vec::new());
    *envelope.status_mut() = status;
    envelope
}
