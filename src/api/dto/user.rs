//! User-related DTOs for API requests and responses.

use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::UserRecord;
use crate::utils::validation::{validate_not_blank, validate_present, validate_strong_password};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a new user.
///
/// Missing or `null` string fields decode as empty so that validation can
/// report them as `required` alongside every other failing field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_present"), email)]
    #[schema(format = "email", example = "jane@example.com")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_present"))]
    #[schema(example = "Jane")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_present"))]
    #[schema(example = "Doe")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "validate_strong_password"))]
    #[schema(format = "password", min_length = 8, example = "StrongPass123!")]
    pub password: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    #[schema(format = "uri", example = "https://cdn.example.com/jane.png")]
    pub image: Option<String>,
}

/// Request body for a partial user update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Janet")]
    pub first_name: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url)]
    #[schema(format = "uri")]
    pub image: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// An empty image string counts as no image.
fn empty_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}

/// Query string of `GET /v1/users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmailQuery {
    /// Email address to look up
    #[serde(default)]
    pub email: Option<String>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Public projection of a user; never carries the password hash or the
/// verification code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub image: Option<String>,
    pub verified: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: Timestamp,
}

impl From<UserRecord> for UserView {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_hex(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            image: user.image,
            verified: user.verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
