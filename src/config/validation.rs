//! Configuration validation logic
//!
//! Each section validates itself and reports the first offending key.

use tracing_subscriber::EnvFilter;

use crate::config::error::ConfigError;
use crate::config::settings::{
    ApplicationConfig, DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings,
};

const VALID_DATABASE_SCHEMES: &[&str] = &["mongodb://", "mongodb+srv://"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ApplicationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid(
                "application.name",
                "Application name cannot be empty.",
            ));
        }
        Ok(())
    }
}

impl ServerConfig {
    /// # Validation Rules
    /// - Port must be between 1 and 65535
    /// - Request and shutdown timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid(
                "server.host",
                "Host cannot be empty.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::invalid(
                "server.port",
                "Port must be between 1 and 65535. Please specify a valid port number.",
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::invalid(
                "server.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.shutdown_timeout == 0 {
            return Err(ConfigError::invalid(
                "server.shutdown_timeout",
                "Shutdown timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl DatabaseConfig {
    /// # Validation Rules
    /// - URL must use the `mongodb://` or `mongodb+srv://` scheme
    /// - Database name must not be empty
    /// - Max pool size must be greater than 0 and not below min pool size
    /// - Connect and operation timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::invalid(
                "database.url",
                "Database URL is required. Please specify a MongoDB connection string.",
            ));
        }

        if !VALID_DATABASE_SCHEMES
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(ConfigError::UnsupportedDatabaseScheme);
        }

        if self.database.trim().is_empty() {
            return Err(ConfigError::invalid(
                "database.database",
                "Database name cannot be empty.",
            ));
        }

        if self.max_pool_size == 0 {
            return Err(ConfigError::invalid(
                "database.max_pool_size",
                "Max pool size must be greater than 0.",
            ));
        }

        if self.min_pool_size > self.max_pool_size {
            return Err(ConfigError::PoolBounds {
                min: self.min_pool_size,
                max: self.max_pool_size,
            });
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::invalid(
                "database.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.operation_timeout == 0 {
            return Err(ConfigError::invalid(
                "database.operation_timeout",
                "Operation timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if !self.enabled {
            return Ok(());
        }

        if self.path.trim().is_empty() {
            return Err(ConfigError::invalid(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if self.rotation.max_size == 0 {
            return Err(ConfigError::invalid(
                "logger.file.rotation.max_size",
                "Maximum file size must be greater than 0.",
            ));
        }

        if self.rotation.max_files == 0 {
            return Err(ConfigError::invalid(
                "logger.file.rotation.max_files",
                "Maximum number of files must be greater than 0.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Level accepts plain levels and `EnvFilter` directives.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = EnvFilter::try_new(&self.level) {
            return Err(ConfigError::invalid(
                "logger.level",
                format!("Invalid log level '{}': {}", self.level, e),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::invalid(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.application.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
