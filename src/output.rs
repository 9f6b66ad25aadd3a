//! Output directory handling: clearing and pretty JSON writes.

use crate::error::ApiError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Writes `<name>.json` files into one directory.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove every regular file in the directory, creating it if needed.
    /// Subdirectories are left alone. Returns the number of files removed.
    pub fn clear(&self) -> Result<usize, ApiError> {
        fs::create_dir_all(&self.dir).map_err(|e| ApiError::io(&self.dir, e))?;
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir).map_err(|e| ApiError::io(&self.dir, e))? {
            let entry = entry.map_err(|e| ApiError::io(&self.dir, e))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| ApiError::io(&path, e))?;
            if file_type.is_file() || file_type.is_symlink() {
                fs::remove_file(&path).map_err(|e| ApiError::io(&path, e))?;
                debug!(path = %path.display(), "Removed previous output");
                removed += 1;
            }
        }
        info!(dir = %self.dir.display(), removed, "Cleared output directory");
        Ok(removed)
    }

    /// Serialize `value` with 2-space indentation to `<dir>/<name>.json`.
    pub fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf, ApiError> {
        fs::create_dir_all(&self.dir).map_err(|e| ApiError::io(&self.dir, e))?;
        let path = self.dir.join(format!("{}.json", name));
        let body = serde_json::to_string_pretty(value).map_err(|e| ApiError::json(&path, e))?;
        fs::write(&path, &body).map_err(|e| ApiError::io(&path, e))?;
        info!(file = %format!("{}.json", name), bytes = body.len(), "Wrote file");
        Ok(path)
    }
}
