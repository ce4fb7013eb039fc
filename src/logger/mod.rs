//! Logger module
//!
//! Built on `tracing-subscriber`:
//! - console output, colored only on a terminal
//! - optional file output in full, compact or JSON format
//! - size rotation with optional gzip compression of backups

pub mod compression;
pub mod config;
pub mod error;
pub mod rotation;
pub(crate) mod writer;

pub use config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, RotationConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use writer::RotatingFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logger(config: &LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).map_err(|e| LoggerError::InvalidFilter {
        directive: config.level.clone(),
        reason: e.to_string(),
    })?;

    // File layer goes first so console ANSI settings do not leak into span
    // fields written to the file (tokio-rs/tracing#1817).
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
    if config.file.enabled {
        let writer = RotatingFileWriter::new(&config.file)?;
        layers.push(file_layer(config.file.format, writer));
    }
    if config.console.enabled {
        layers.push(console_layer(config.console.colored));
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))
}

fn file_layer(format: LogFormat, writer: RotatingFileWriter) -> BoxedLayer {
    match format {
        LogFormat::Full => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .compact()
            .with_writer(writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_ansi(false)
            .json()
            .with_writer(writer)
            .boxed(),
    }
}

fn console_layer(colored: bool) -> BoxedLayer {
    let use_ansi = colored && std::io::stdout().is_terminal();
    fmt::layer()
        .with_ansi(use_ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}
