//! Path management for Minted
//!
//! ## Path Resolution Order
//!
//! 1. `MINTED_DIR` environment variable (if set)
//! 2. The platform config directory for `minted` (e.g. `~/.config/minted`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::MintedError;

/// Manages all paths used by Minted
#[derive(Debug, Clone)]
pub struct MintedPaths {
    /// Base directory for all Minted data
    base_dir: PathBuf,
}

impl MintedPaths {
    /// Create a new MintedPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and
    /// `MINTED_DIR` is unset.
    pub fn new() -> Result<Self, MintedError> {
        let base_dir = match std::env::var("MINTED_DIR") {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create MintedPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), MintedError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MintedError::Io(format!("Failed to create base directory: {}", e)))
    }
}

fn resolve_default_path() -> Result<PathBuf, MintedError> {
    ProjectDirs::from("", "", "minted")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            MintedError::Config("Could not determine a config directory; set MINTED_DIR".into())
        })
}
