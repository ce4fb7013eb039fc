//! Rotating file writer plugged into `tracing-subscriber`

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use super::config::FileConfig;
use super::error::LoggerError;
use super::rotation::RotationManager;

/// File writer with size rotation. After a failed write it falls back to
/// stderr for the rest of the process so log lines are never lost silently.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    rotation_manager: RotationManager,
    fallback_mode: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            std::fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                current_size,
                rotation_manager: RotationManager::new(config.rotation.clone()),
                fallback_mode: false,
            })),
            path: config.path.clone(),
        })
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            state: self.state.clone(),
            path: self.path.clone(),
        }
    }
}

pub struct RotatingWriterGuard {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        if state.rotation_manager.should_rotate(state.current_size) {
            if let Err(e) = self.rotate(&mut state) {
                return fall_back(&mut state, buf, e);
            }
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => fall_back(&mut state, buf, e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl RotatingWriterGuard {
    fn rotate(&self, state: &mut WriterState) -> io::Result<()> {
        state.file.flush()?;
        state
            .rotation_manager
            .rotate(&self.path)
            .map_err(|e| io::Error::other(e.to_string()))?;
        state.file = open_log_file(&self.path, false)?;
        state.current_size = 0;
        Ok(())
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn fall_back(state: &mut WriterState, buf: &[u8], error: io::Error) -> io::Result<usize> {
    state.fallback_mode = true;
    eprintln!("[logger] file write failed, falling back to stderr: {}", error);
    io::stderr().write(buf)
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::RotationConfig;
    use tempfile::tempdir;

    fn file_config(path: PathBuf, max_size: u64) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append: true,
            rotation: RotationConfig {
                max_size,
                max_files: 3,
                compress: false,
            },
            ..FileConfig::default()
        }
    }

    #[test]
    fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/app.log");

        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024)).unwrap();
        let mut guard = writer.make_writer();
        guard.write_all(b"hello\n").unwrap();
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_rotates_when_size_reached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), 10)).unwrap();

        writer.make_writer().write_all(b"0123456789").unwrap();
        writer.make_writer().write_all(b"next\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "next\n");
        let backups = std::fs::read_dir(dir.path()).unwrap().count() - 1;
        assert_eq!(backups, 1);
    }

    #[test]
    fn test_append_mode_counts_existing_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "0123456789").unwrap();

        let writer = RotatingFileWriter::new(&file_config(path.clone(), 10)).unwrap();
        writer.make_writer().write_all(b"fresh\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }
}
