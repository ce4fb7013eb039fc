//! Command-line interface
//!
//! - argument parsing with clap
//! - merging CLI overrides over file configuration
//! - command dispatch

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment};

use anyhow::Context;

use crate::config::Settings;
use crate::logger::init_logger;

/// Loads configuration, applies CLI overrides and revalidates.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_cli(cli).context("Failed to load configuration")?;
    merger
        .merge_cli_args(cli)
        .context("Invalid configuration after applying command-line overrides")
}

/// Installs the global tracing subscriber described by `settings.logger`.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let config = settings
        .logger
        .to_logger_config()
        .context("Invalid logger configuration")?;
    init_logger(&config).context("Failed to initialize logger")
}
