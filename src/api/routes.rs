//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{envelope_fallback, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. Envelope fallback - wraps framework errors in the envelope
/// 4. Timeout - bounds the whole request by `request_timeout`
///
/// # Routes
/// - `/v1/users` - User CRUD operations
/// - `/ping`, `/health` - Liveness and health checks
/// - `/swagger-ui`, `/api-docs/openapi.json` - API documentation
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let v1_routes = Router::new().nest("/users", handlers::users::user_routes());

    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(envelope_fallback))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use mongodb::bson::oid::ObjectId;
    use tower::ServiceExt;

    use crate::error::AppResult;
    use crate::models::{UserChanges, UserRecord};
    use crate::repositories::{Repositories, UserRepository};

    struct HangingRepository;

    #[async_trait]
    impl UserRepository for HangingRepository {
        async fn create(&self, user: UserRecord) -> AppResult<UserRecord> {
            std::future::pending::<()>().await;
            Ok(user)
        }
        async fn find_by_id(&self, _id: ObjectId) -> AppResult<Option<UserRecord>> {
            std::future::pending().await
        }
        async fn find_by_email(&self, _email: &str) -> AppResult<Option<UserRecord>> {
            std::future::pending().await
        }
        async fn update_partial(
            &self,
            _id: ObjectId,
            _changes: UserChanges,
        ) -> AppResult<Option<UserRecord>> {
            std::future::pending().await
        }
        async fn delete_by_id(&self, _id: ObjectId) -> AppResult<u64> {
            std::future::pending().await
        }
        async fn ping(&self) -> AppResult<()> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_request_timeout_answers_408_envelope() {
        let state = AppState::new(
            Repositories::new(Arc::new(HangingRepository)),
            Duration::from_secs(60),
        );
        let router = create_router(state, Duration::from_millis(50));

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/v1/users/{}", ObjectId::new().to_hex()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], 40000);
    }
}
