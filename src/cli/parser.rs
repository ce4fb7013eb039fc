//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// User account management backend
#[derive(Parser, Debug)]
#[command(name = "user-backend")]
#[command(about = "User account management backend over MongoDB")]
#[command(long_about = "
user-backend serves a JSON API for creating, reading, updating and deleting
user accounts stored in MongoDB.

EXAMPLES:
    # Start the server with default configuration
    user-backend serve

    # Start server on custom host and port
    user-backend serve --host 0.0.0.0 --port 8080

    # Use a single configuration file
    user-backend --config /etc/user-backend/production.toml serve

    # Load config/production.toml over config/default.toml
    user-backend --env production serve

    # Check configuration without starting the server
    user-backend serve --dry-run

Every setting can also be overridden with BACKEND_* environment variables,
e.g. BACKEND_DATABASE__URL=mongodb://db:27017.
")]
#[command(version = crate::build::PKG_VERSION, long_version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute; `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files under `config/`.
    /// Environment variable overrides still apply.
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        value_parser = super::validation::validate_config_file_path
    )]
    pub config: Option<PathBuf>,

    /// Environment overlay to load (`config/{env}.toml`)
    ///
    /// Overrides BACKEND_APP_ENV.
    #[arg(short, long, global = true, value_enum)]
    pub env: Option<Environment>,

    /// Log level or filter directive, e.g. `debug` or `user_backend=trace,info`
    ///
    /// Takes precedence over --verbose and --quiet.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    ///
    /// Examples:
    ///   user-backend serve                            # Start with defaults
    ///   user-backend serve --host 127.0.0.1 --port 80 # Custom bind address
    ///   user-backend serve --dry-run                  # Validate config without starting
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl Cli {
    /// True when the server should be started (no subcommand, or `serve`
    /// without `--dry-run`).
    pub fn starts_server(&self) -> bool {
        !matches!(self.command, Some(Commands::Serve { dry_run: true, .. }))
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
