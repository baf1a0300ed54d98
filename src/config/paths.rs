//! Path management for dues-cli
//!
//! ## Path Resolution Order
//!
//! 1. `DUES_CLI_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/dues-cli` or `~/.config/dues-cli`
//! 3. Windows: `%APPDATA%\dues-cli`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::DuesError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "DUES_CLI_DATA_DIR";

const APP_DIR_NAME: &str = "dues-cli";

/// Manages all paths used by dues-cli
#[derive(Debug, Clone)]
pub struct DuesPaths {
    base_dir: PathBuf,
}

impl DuesPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, DuesError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create DuesPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/dues-cli/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn members_file(&self) -> PathBuf {
        self.data_dir().join("members.json")
    }

    pub fn payments_file(&self) -> PathBuf {
        self.data_dir().join("payments.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), DuesError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| DuesError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| DuesError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if dues-cli has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default base directory for the platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DuesError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join(APP_DIR_NAME));
        }
    }

    let base = BaseDirs::new()
        .ok_or_else(|| DuesError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join(APP_DIR_NAME))
}

/// Resolve the default base directory for the platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DuesError> {
    let base = BaseDirs::new()
        .ok_or_else(|| DuesError::Config("Could not determine APPDATA directory".into()))?;
    Ok(base.config_dir().join(APP_DIR_NAME))
}
