//! Failures while assembling the service settings

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required settings file {} does not exist", path.display())]
    MissingFile { path: PathBuf },

    /// Merging the sources or deserializing them into `Settings` failed
    #[error("settings could not be read: {0}")]
    Source(#[from] config::ConfigError),

    #[error(
        "BACKEND_CONFIG_DIR ({}) and BACKEND_CONFIG_FILE ({}) cannot both be set",
        dir.display(),
        file.display()
    )]
    ConflictingSources { dir: PathBuf, file: PathBuf },

    #[error("unknown environment '{value}', expected development, test, staging or production")]
    UnknownEnvironment { value: String },

    /// The connection string is never echoed, it may carry credentials
    #[error("database.url must use the mongodb:// or mongodb+srv:// scheme")]
    UnsupportedDatabaseScheme,

    #[error("database.min_pool_size ({min}) exceeds database.max_pool_size ({max})")]
    PoolBounds { min: u32, max: u32 },

    #[error("{field}: {message}")]
    Invalid { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Dotted settings key the failure refers to, e.g. `database.url`.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::UnsupportedDatabaseScheme => Some("database.url"),
            ConfigError::PoolBounds { .. } => Some("database.min_pool_size"),
            ConfigError::Invalid { field, .. } => Some(field),
            _ => None,
        }
    }
}
