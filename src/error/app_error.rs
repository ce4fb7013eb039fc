use crate::config::ConfigError;
use crate::error::ErrorCode;
use crate::utils::validation::{FieldError, field_errors};
use thiserror::Error;

/// Application-wide error type.
///
/// Each variant resolves to exactly one response code; store and internal
/// failures keep their cause for logging but never expose it to clients.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request body or unreadable input
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// One or more request fields failed validation
    #[error("Validation failed for {} field(s)", errors.len())]
    Validation { errors: Vec<FieldError> },

    /// Path parameter that is not a 24 hex character identifier
    #[error("Invalid object id: '{value}'")]
    InvalidObjectId { value: String },

    /// Missing or empty query parameter
    #[error("Invalid query parameter: {param}")]
    QueryParamInvalid { param: String },

    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Store operation failed
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Store operation exceeded its deadline
    #[error("Database operation timed out: {operation}")]
    Timeout { operation: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    pub fn not_found(entity: &str, field: &str, value: impl Into<String>) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn database(operation: &str, source: impl Into<anyhow::Error>) -> Self {
        AppError::Database {
            operation: operation.to_string(),
            source: source.into(),
        }
    }

    /// Response code carried by the error envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::Validation { .. } | AppError::InvalidObjectId { .. } => {
                ErrorCode::ParamInvalid
            }
            AppError::QueryParamInvalid { .. } => ErrorCode::QueryParamInvalid,
            AppError::NotFound { .. } => ErrorCode::UserNotExists,
            AppError::Database { .. }
            | AppError::Timeout { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Whether the error originates from the server side and must be logged.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Database { .. }
                | AppError::Timeout { .. }
                | AppError::Configuration { .. }
                | AppError::Internal { .. }
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::database("mongodb operation", error)
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = error.key().unwrap_or("settings").to_string();
        AppError::Configuration {
            key,
            source: error.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation {
            errors: field_errors(&errors),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::STRONG_PASSWORD;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn test_client_errors_map_to_client_codes() {
        let err = AppError::BadRequest {
            message: "bad json".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::BadRequest);

        let err = AppError::InvalidObjectId {
            value: "xyz".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::ParamInvalid);
        assert!(err.to_string().contains("xyz"));

        let err = AppError::QueryParamInvalid {
            param: "email".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::QueryParamInvalid);
    }

    #[test]
    fn test_not_found_maps_to_user_not_exists() {
        let err = AppError::not_found("user", "id", "507f1f77bcf86cd799439011");
        assert_eq!(err.code(), ErrorCode::UserNotExists);
        assert!(!err.is_internal());
    }

    #[test]
    fn test_store_errors_are_internal() {
        let err = AppError::database("insert user", anyhow::anyhow!("duplicate key"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.is_internal());

        let err = AppError::Timeout {
            operation: "find user".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.is_internal());
    }

    #[test]
    fn test_validation_errors_convert_to_field_errors() {
        let mut failures = ValidationErrors::new();
        failures.add("password", ValidationError::new(STRONG_PASSWORD));

        let err: AppError = failures.into();
        assert_eq!(err.code(), ErrorCode::ParamInvalid);
        match err {
            AppError::Validation { errors } => {
                assert_eq!(errors, vec![FieldError::new("password", STRONG_PASSWORD)]);
                assert_eq!(
                    errors[0].message(),
                    "Fields password is invalid due to strongPassword"
                );
            }
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_anyhow_converts_to_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_config_error_keeps_key() {
        let err: AppError = ConfigError::UnsupportedDatabaseScheme.into();
        assert!(matches!(&err, AppError::Configuration { key, .. } if key == "database.url"));
        assert!(err.is_internal());
    }
}
