//! Health check endpoint handlers.
//!
//! `/ping` answers without touching dependencies; `/health` round-trips to
//! the document store and reports build metadata.

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus, PingResponse};
use crate::state::AppState;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use std::collections::HashMap;
use std::time::Instant;

/// Creates health check routes.
///
/// # Routes
/// - `GET /ping` - Liveness probe
/// - `GET /health` - Health check including the store
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
}

/// Liveness probe. If we can respond, we're alive.
#[utoipa::path(
    get,
    path = "/ping",
    responses((status = 200, description = "Service is alive", body = PingResponse)),
    tag = HEALTH_TAG
)]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse::pong())
}

/// Health check endpoint.
///
/// # Responses
/// - `200 OK` - Store reachable
/// - `503 Service Unavailable` - Store unreachable
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database = check_database(&state).await;
    let status = database.status;

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        commit: crate::build::SHORT_COMMIT.to_string(),
        build_time: crate::build::BUILD_TIME.to_string(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response)).into_response()
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let result = state.services.users.ping().await;
    let response_time_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(()) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Connected".to_string()),
            response_time_ms,
        },
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some("Unreachable".to_string()),
                response_time_ms,
            }
        }
    }
}
