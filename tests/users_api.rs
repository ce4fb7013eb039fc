//! Router tests for the user API
//!
//! Requests go through the full router (middleware, extractors, envelope)
//! against the in-memory store.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use user_backend::AppState;
use user_backend::api::routes::create_router;

const TIMEOUT: Duration = Duration::from_secs(10);

fn test_state() -> AppState {
    AppState::in_memory(TIMEOUT)
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = create_router(state.clone(), TIMEOUT)
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

fn new_user(email: &str) -> Value {
    json!({
        "email": email,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "password": "StrongPass123!",
        "image": "https://example.com/ada.png"
    })
}

async fn create(state: &AppState, email: &str) -> Value {
    let (status, body) = send(state, Method::POST, "/v1/users", Some(new_user(email))).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body["data"].clone()
}

fn timestamp(value: &Value) -> jiff::Timestamp {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_create_returns_public_view() {
    let state = test_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/v1/users",
        Some(new_user("ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["code"], 20003);
    assert_eq!(body["message"], "Created Success");
    let data = &body["data"];
    assert_eq!(data["email"], "ada@example.com");
    assert_eq!(data["first_name"], "Ada");
    assert_eq!(data["verified"], false);
    assert_eq!(data["id"].as_str().unwrap().len(), 24);
    assert!(data.get("password").is_none());
    assert!(data.get("verification_code").is_none());
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_create_then_fetch_by_id() {
    let state = test_state();
    let created = create(&state, "grace@example.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&state, Method::GET, &format!("/v1/users/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 20000);
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"], created);
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("verification_code").is_none());
}

#[tokio::test]
async fn test_fetch_by_email() {
    let state = test_state();
    let created = create(&state, "linus@example.com").await;

    let (status, body) = send(
        &state,
        Method::GET,
        "/v1/users?email=linus@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], created["id"]);

    let (status, body) = send(
        &state,
        Method::GET,
        "/v1/users?email=nobody@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);
    assert_eq!(body["message"], "User not exists");
}

#[tokio::test]
async fn test_missing_email_query_is_rejected() {
    let state = test_state();
    for uri in ["/v1/users", "/v1/users?email=", "/v1/users?email=%20"] {
        let (status, body) = send(&state, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri {uri}");
        assert_eq!(body["code"], 40002);
        assert_eq!(body["message"], "Query param invalid");
    }
}

#[tokio::test]
async fn test_three_field_errors() {
    let state = test_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/v1/users",
        Some(json!({
            "email": "not-an-email",
            "last_name": "Lovelace",
            "password": "weakpass"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40001);
    assert_eq!(body["message"], "Param invalid");
    assert_eq!(
        body["errors"],
        json!([
            "Fields email is invalid due to email",
            "Field first_name is required",
            "Fields password is invalid due to strongPassword"
        ])
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_null_field_is_listed_with_other_errors() {
    let state = test_state();
    let (status, body) = send(
        &state,
        Method::POST,
        "/v1/users",
        Some(json!({
            "email": "not-an-email",
            "first_name": null,
            "last_name": "Lovelace",
            "password": "weakpass"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40001);
    assert_eq!(
        body["errors"],
        json!([
            "Fields email is invalid due to email",
            "Field first_name is required",
            "Fields password is invalid due to strongPassword"
        ])
    );
}

#[tokio::test]
async fn test_non_hierarchical_image_url_accepted() {
    let state = test_state();
    let mut user = new_user("mailto@example.com");
    user["image"] = json!("mailto:ada@example.com");

    let (status, body) = send(&state, Method::POST, "/v1/users", Some(user)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["image"], "mailto:ada@example.com");
}

#[tokio::test]
async fn test_invalid_image_url_rejected() {
    let state = test_state();
    let mut user = new_user("img@example.com");
    user["image"] = json!("not a url");

    let (status, body) = send(&state, Method::POST, "/v1/users", Some(user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Fields image is invalid due to url"]));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let state = test_state();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/users")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = create_router(state.clone(), TIMEOUT)
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], 40000);
    assert_eq!(body["message"], "Bad Request");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/users")
        .body(Body::from(new_user("x@example.com").to_string()))
        .unwrap();
    let response = create_router(state, TIMEOUT).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response.into_body()).await["code"], 40000);
}

#[tokio::test]
async fn test_invalid_id_rejected_for_every_id_route() {
    let state = test_state();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let body = (method == Method::PUT).then(|| json!({ "first_name": "X" }));
        let (status, body) = send(&state, method.clone(), "/v1/users/507f1f", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "method {method}");
        assert_eq!(body["code"], 40001);
        assert!(body.get("errors").is_none());
    }
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let state = test_state();
    let uri = "/v1/users/507f1f77bcf86cd799439011";

    let (status, body) = send(&state, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);

    let (status, _) = send(&state, Method::PUT, uri, Some(json!({ "first_name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&state, Method::DELETE, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_partial_update_only_changes_supplied_fields() {
    let state = test_state();
    let created = create(&state, "update@example.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &state,
        Method::PUT,
        &format!("/v1/users/{id}"),
        Some(json!({ "first_name": "Augusta" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 20000);
    let updated = &body["data"];
    assert_eq!(updated["first_name"], "Augusta");
    assert_eq!(updated["last_name"], created["last_name"]);
    assert_eq!(updated["image"], created["image"]);
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(timestamp(&updated["updated_at"]) > timestamp(&created["updated_at"]));
}

#[tokio::test]
async fn test_empty_update_still_advances_updated_at() {
    let state = test_state();
    let created = create(&state, "touch@example.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&state, Method::PUT, &format!("/v1/users/{id}"), Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], created["first_name"]);
    assert!(timestamp(&body["data"]["updated_at"]) > timestamp(&created["updated_at"]));
}

#[tokio::test]
async fn test_update_rejects_blank_names() {
    let state = test_state();
    let created = create(&state, "blank@example.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &state,
        Method::PUT,
        &format!("/v1/users/{id}"),
        Some(json!({ "first_name": "", "image": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 40001);
    assert_eq!(
        body["errors"],
        json!([
            "Fields first_name is invalid due to not_empty",
            "Fields image is invalid due to url"
        ])
    );
}

#[tokio::test]
async fn test_delete_then_fetch_is_not_found() {
    let state = test_state();
    let created = create(&state, "delete@example.com").await;
    let uri = format!("/v1/users/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&state, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 20000);
    assert_eq!(body["data"], json!({}));

    let (status, body) = send(&state, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40401);

    let (status, _) = send(&state, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email_is_internal_error() {
    let state = test_state();
    create(&state, "twice@example.com").await;

    let (status, body) = send(
        &state,
        Method::POST,
        "/v1/users",
        Some(new_user("twice@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 50000);
    assert_eq!(body["message"], "Internal error");
    assert!(body.get("errors").is_none());
    assert!(!body.to_string().contains("duplicate"));
}

#[tokio::test]
async fn test_framework_errors_use_envelope() {
    let state = test_state();

    let (status, body) = send(&state, Method::GET, "/v2/nothing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 40400);
    assert_eq!(body["message"], "Resource not found");

    let (status, body) = send(&state, Method::PATCH, "/v1/users", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["code"], 40000);
}

#[tokio::test]
async fn test_ping_and_health() {
    let state = test_state();

    let (status, body) = send(&state, Method::GET, "/ping", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong" }));

    let (status, body) = send(&state, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let state = test_state();
    let request = Request::builder()
        .uri("/ping")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let response = create_router(state, TIMEOUT).oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let state = test_state();
    let (status, body) = send(&state, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/v1/users/{id}"].is_object());
}
