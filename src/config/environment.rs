//! Deployment environment, which picks the `config/{name}.toml` overlay

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

/// Accepted spellings, matched case-insensitively.
const NAMES: &[(&str, Environment)] = &[
    ("development", Environment::Development),
    ("dev", Environment::Development),
    ("test", Environment::Test),
    ("staging", Environment::Staging),
    ("stage", Environment::Staging),
    ("production", Environment::Production),
    ("prod", Environment::Production),
];

impl Environment {
    pub const ENV_VAR: &'static str = "BACKEND_APP_ENV";

    /// Environment named by `BACKEND_APP_ENV`; `Development` when unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// File name of the overlay layered over `default.toml`.
    pub fn overlay_file(&self) -> String {
        format!("{}.toml", self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, env)| *env)
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
