//! User CRUD request handlers.
//!
//! Each handler decodes and validates its input, calls the user service and
//! wraps the outcome in the response envelope. Identifier and validation
//! failures are answered before the store is touched.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
    routing::get,
};
use mongodb::bson::oid::ObjectId;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    self, ApiResponse, CreateUserRequest, EmailQuery, Empty, UpdateUserRequest, UserView,
};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::state::AppState;
use crate::utils::ValidatedJson;
use crate::utils::validation::is_valid_object_id;
use validator::Validate;

/// Creates user-related routes.
///
/// Routes:
/// - GET /?email=  - Get user by email
/// - POST /        - Create a new user
/// - GET /{id}     - Get user by ID
/// - PUT /{id}     - Partially update user by ID
/// - DELETE /{id}  - Delete user by ID
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_user_by_email).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

fn parse_object_id(raw: &str) -> AppResult<ObjectId> {
    let invalid = || AppError::InvalidObjectId {
        value: raw.to_string(),
    };
    if !is_valid_object_id(raw) {
        return Err(invalid());
    }
    ObjectId::parse_str(raw).map_err(|_| invalid())
}

/// POST /v1/users - Create new user
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserView>),
        (status = 400, description = "Malformed body or invalid fields", body = ApiResponse<Empty>),
        (status = 500, description = "Store failure", body = ApiResponse<Empty>)
    ),
    tag = USER_TAG
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<Response> {
    let user = state.services.users.create_user(payload).await?;
    Ok(dto::success(
        StatusCode::CREATED,
        ErrorCode::CreatedSuccess,
        UserView::from(user),
    ))
}

/// GET /v1/users/{id} - Get user by ID
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "24 hex character user id")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserView>),
        (status = 400, description = "Invalid id", body = ApiResponse<Empty>),
        (status = 404, description = "User not found", body = ApiResponse<Empty>)
    ),
    tag = USER_TAG
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_object_id(&id)?;
    let user = state.services.users.get_user(id).await?;
    Ok(dto::success(StatusCode::OK, ErrorCode::Success, UserView::from(user)))
}

/// GET /v1/users?email= - Get user by email
#[utoipa::path(
    get,
    path = "/v1/users",
    params(EmailQuery),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserView>),
        (status = 400, description = "Missing email", body = ApiResponse<Empty>),
        (status = 404, description = "User not found", body = ApiResponse<Empty>)
    ),
    tag = USER_TAG
)]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> AppResult<Response> {
    let invalid = || AppError::QueryParamInvalid {
        param: "email".to_string(),
    };
    let Query(query) = query.map_err(|_| invalid())?;
    let email = query.email.filter(|e| !e.trim().is_empty()).ok_or_else(invalid)?;

    let user = state.services.users.get_user_by_email(&email).await?;
    Ok(dto::success(StatusCode::OK, ErrorCode::Success, UserView::from(user)))
}

/// PUT /v1/users/{id} - Partially update user
///
/// The id is checked before the body, so a bad id wins over a bad body.
#[utoipa::path(
    put,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "24 hex character user id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserView>),
        (status = 400, description = "Invalid id or fields", body = ApiResponse<Empty>),
        (status = 404, description = "User not found", body = ApiResponse<Empty>),
        (status = 500, description = "Store failure", body = ApiResponse<Empty>)
    ),
    tag = USER_TAG
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Response> {
    let id = parse_object_id(&id)?;
    let Json(payload) = payload?;
    payload.validate()?;

    let user = state.services.users.update_user(id, payload).await?;
    Ok(dto::success(StatusCode::OK, ErrorCode::Success, UserView::from(user)))
}

/// DELETE /v1/users/{id} - Delete user
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    params(("id" = String, Path, description = "24 hex character user id")),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<Empty>),
        (status = 400, description = "Invalid id", body = ApiResponse<Empty>),
        (status = 404, description = "User not found", body = ApiResponse<Empty>)
    ),
    tag = USER_TAG
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_object_id(&id)?;
    state.services.users.delete_user(id).await?;
    Ok(dto::success(StatusCode::OK, ErrorCode::Success, Empty {}))
}
