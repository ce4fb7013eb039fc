//! Size-based rotation of the active log file

use std::fs;
use std::path::{Path, PathBuf};

use jiff::Zoned;

use super::compression::compress_file;
use super::config::RotationConfig;
use super::error::LoggerError;

pub struct RotationManager {
    config: RotationConfig,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    pub fn should_rotate(&self, current_file_size: u64) -> bool {
        current_file_size >= self.config.max_size
    }

    /// Moves the active file aside, compresses it when enabled and prunes
    /// backups beyond `max_files`. The caller reopens the active file.
    pub fn rotate(&self, current_path: &Path) -> Result<(), LoggerError> {
        if current_path.exists() {
            let rotated_path = rotated_path(current_path);
            fs::rename(current_path, &rotated_path)?;

            if self.config.compress {
                compress_file(&rotated_path)?;
            }
        }

        self.cleanup_old_files(current_path)
    }

    fn cleanup_old_files(&self, base_path: &Path) -> Result<(), LoggerError> {
        let mut backups = list_backups(base_path)?;

        // oldest first
        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            a_time.cmp(&b_time).then_with(|| a.cmp(b))
        });

        let excess = backups.len().saturating_sub(self.config.max_files);
        for oldest in backups.iter().take(excess) {
            fs::remove_file(oldest)?;
        }

        Ok(())
    }
}

/// `<stem>.<timestamp>[.<n>].<ext>` next to the active file.
fn rotated_path(base_path: &Path) -> PathBuf {
    let timestamp = Zoned::now().strftime("%Y%m%d_%H%M%S").to_string();
    let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = base_path.extension().map(|e| e.to_string_lossy());

    let name = |suffix: String| match &ext {
        Some(ext) => format!("{stem}.{timestamp}{suffix}.{ext}"),
        None => format!("{stem}.{timestamp}{suffix}"),
    };

    let mut candidate = base_path.with_file_name(name(String::new()));
    let mut n = 1;
    while candidate.exists() || gz_sibling(&candidate).exists() {
        candidate = base_path.with_file_name(name(format!(".{n}")));
        n += 1;
    }
    candidate
}

fn gz_sibling(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".gz");
    path.with_file_name(name)
}

fn list_backups(base_path: &Path) -> Result<Vec<PathBuf>, LoggerError> {
    let parent = match base_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        "{}.",
        base_path.file_stem().unwrap_or_default().to_string_lossy()
    );
    let active = base_path.file_name().unwrap_or_default();

    let backups = fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            let file_name = path.file_name().unwrap_or_default();
            file_name != active && file_name.to_string_lossy().starts_with(&prefix)
        })
        .collect();

    Ok(backups)
}
