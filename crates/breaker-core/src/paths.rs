//! File system paths for the companion app.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Storage file name under the base directory.
const STORAGE_FILE_NAME: &str = "storage.json";

/// Manages file system paths for the companion app.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for app files (~/.breakerbot)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.breakerbot`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".breakerbot"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.breakerbot).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.breakerbot/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the key-value storage file path (~/.breakerbot/storage.json).
    pub fn storage_file(&self) -> PathBuf {
        self.base_dir.join(STORAGE_FILE_NAME)
    }

    /// Get the logs directory (~/.breakerbot/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}
