//! Failures while installing the subscriber or maintaining log files

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("log file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("invalid log filter '{directive}': {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("unknown log format '{0}', expected full, compact or json")]
    UnknownFormat(String),

    #[error("console and file output are both disabled")]
    NoOutput,

    #[error("file output is enabled without a path")]
    MissingPath,

    /// `max_size` or `max_files` set to zero
    #[error("rotation {setting} must be greater than 0")]
    ZeroRotationLimit { setting: &'static str },

    #[error("cannot compress {}: path has no file name", path.display())]
    UnnamedBackup { path: PathBuf },

    #[error("global subscriber already installed: {0}")]
    AlreadyInitialized(String),
}
