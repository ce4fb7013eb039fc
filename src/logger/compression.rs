//! Gzip compression of rotated log files

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::error::LoggerError;

/// Compresses `file_path` into `<file_path>.gz` and removes the original.
pub fn compress_file(file_path: &Path) -> Result<PathBuf, LoggerError> {
    let mut name = file_path
        .file_name()
        .ok_or_else(|| LoggerError::UnnamedBackup {
            path: file_path.to_path_buf(),
        })?
        .to_os_string();
    name.push(".gz");
    let compressed_path = file_path.with_file_name(name);

    let mut input = BufReader::new(File::open(file_path)?);
    let output = BufWriter::new(File::create(&compressed_path)?);
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.flush()?;

    fs::remove_file(file_path)?;
    Ok(compressed_path)
}
