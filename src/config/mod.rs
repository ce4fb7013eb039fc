//! Configuration management
//!
//! Layered TOML files plus `BACKEND_*` environment overrides; see
//! [`ConfigLoader`] for the precedence rules.

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, DatabaseConfig, FileSettings, LoggerSettings, RotationSettings,
    ServerConfig, Settings,
};
