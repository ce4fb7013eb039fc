use utoipa::OpenApi;

pub const USER_TAG: &str = "User";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Backend",
        description = "User account management API",
    ),
    paths(
        crate::api::handlers::users::create_user,
        crate::api::handlers::users::get_user,
        crate::api::handlers::users::get_user_by_email,
        crate::api::handlers::users::update_user,
        crate::api::handlers::users::delete_user,
        crate::api::handlers::health::ping,
        crate::api::handlers::health::health_check,
    ),
    components(
        schemas(
            crate::api::dto::Empty,
            crate::api::dto::UserView,
            crate::api::dto::CreateUserRequest,
            crate::api::dto::UpdateUserRequest,
            crate::utils::validation::FieldError,
        )
    ),
    tags(
        (name = USER_TAG, description = "User management endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
