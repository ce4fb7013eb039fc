//! Layered configuration loader
//!
//! Sources, lowest priority first:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `BACKEND_*` environment variables, `__` separating nested keys
//!
//! A single file (from `BACKEND_CONFIG_FILE` or `--config`) replaces the
//! three file layers; environment variables still apply on top.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "BACKEND_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "BACKEND_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "BACKEND";

const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Reads `BACKEND_CONFIG_DIR`, `BACKEND_CONFIG_FILE` and `BACKEND_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Fails if both `BACKEND_CONFIG_DIR` and `BACKEND_CONFIG_FILE` are set.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from);
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if let (Some(dir), Some(file)) = (&config_dir, &config_file) {
            return Err(ConfigError::ConflictingSources {
                dir: dir.clone(),
                file: file.clone(),
            });
        }

        Ok(Self {
            config_dir: config_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env()?,
        })
    }

    /// Loader for one explicit file, as given by `--config`.
    ///
    /// No overlay is read in this mode, so an unparsable `BACKEND_APP_ENV`
    /// falls back to the default environment.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env().unwrap_or_default(),
        }
    }

    /// Overrides the environment read from `BACKEND_APP_ENV`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Loads, deserializes and validates the settings.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(config_file) => add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = add_file_source(builder, &default_path, true)?;

        let env_path = self
            .config_dir
            .join(self.environment.overlay_file());
        let builder = add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        add_file_source(builder, &local_path, false)
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(required)))
}

/// `BACKEND_SERVER__PORT` -> `server.port`
fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator(ENV_SEPARATOR)
            .ignore_empty(true)
            .try_parsing(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // env vars are process-wide; tests touching them run one at a time
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const MANAGED_VARS: &[&str] = &[
        CONFIG_DIR_ENV,
        CONFIG_FILE_ENV,
        "BACKEND_APP_ENV",
        "BACKEND_SERVER__PORT",
        "BACKEND_DATABASE__URL",
        "BACKEND_DATABASE__DATABASE",
    ];

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).unwrap();
        }
        temp_dir
    }

    /// Clears the managed variables on creation and restores them on drop.
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            for key in MANAGED_VARS {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.remember(key);
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.remember(key);
            unsafe {
                std::env::remove_var(key);
            }
        }

        fn remember(&mut self, key: &str) {
            if !self.vars_to_restore.iter().any(|(k, _)| k == key) {
                self.vars_to_restore
                    .push((key.to_string(), std::env::var(key).ok()));
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in &self.vars_to_restore {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    const DEFAULT_TOML: &str = r#"
[server]
host = "127.0.0.1"
port = 3000

[database]
url = "mongodb://default-host:27017"
database = "users_default"
"#;

    #[test]
    fn test_loader_defaults() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir(), Path::new("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        let err = ConfigLoader::new().unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingSources { .. }));
    }

    #[test]
    fn test_unknown_app_env_is_rejected() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set("BACKEND_APP_ENV", "qa");

        let err = ConfigLoader::new().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment { value } if value == "qa"));
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn test_environment_and_local_layers() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("production.toml", "[server]\nport = 8080\n"),
            ("local.toml", "[database]\ndatabase = \"users_local\"\n"),
        ]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("BACKEND_APP_ENV", "prod");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 8080);

        let staging = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Staging)
            .load()
            .unwrap();
        assert_eq!(staging.server.port, 3000);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.database.database, "users_local");
        assert_eq!(settings.database.url, "mongodb://default-host:27017");
    }

    #[test]
    fn test_env_vars_override_files() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("BACKEND_SERVER__PORT", "4000");
        env.set("BACKEND_DATABASE__URL", "mongodb+srv://cluster.example.net");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.database.url, "mongodb+srv://cluster.example.net");
    }

    #[test]
    fn test_single_file_mode_skips_layers() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[
            ("custom.toml", "[server]\nport = 5005\n"),
            ("local.toml", "[server]\nport = 9999\n"),
        ]);
        let file = temp_dir.path().join("custom.toml");
        env.set(CONFIG_FILE_ENV, file.to_str().unwrap());

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 5005);

        let settings = ConfigLoader::from_file(&file).load().unwrap();
        assert_eq!(settings.server.port, 5005);
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nurl = \"postgres://localhost/db\"\n",
        )]);
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedDatabaseScheme));
    }
}
