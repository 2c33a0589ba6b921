//! History configuration.
//!
//! Stored as TOML in the platform-specific configuration folder:
//! - macOS: ~/Library/Application Support/navkit/
//! - Windows: %APPDATA%/navkit/config/
//! - Linux: ~/.config/navkit/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{NavkitError, Result};
use crate::location::NormalizeConfig;

const APP_QUALIFIER: &str = "";
const APP_ORG: &str = "";
const APP_NAME: &str = "navkit";
const CONFIG_FILENAME: &str = "config.toml";

// =============================================================================
// ROOT CONFIG
// =============================================================================

/// Configuration for a [`NavigationHistory`](crate::NavigationHistory).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// History behaviour.
    pub history: HistorySettings,

    /// URL cleaning rules.
    pub normalize: NormalizeConfig,
}

/// History behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of entries kept across the back and forward stacks.
    ///
    /// The oldest back entries are dropped first. `None` keeps everything.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,

    /// Whether a new session starts with the `disabled` flag set.
    pub start_disabled: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_entries: None,
            start_disabled: true,
        }
    }
}

impl HistoryConfig {
    /// Get the path to the config file.
    ///
    /// Returns `None` if the platform-specific directory cannot be determined.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load configuration from the default path.
    ///
    /// Returns defaults if:
    /// - The config file doesn't exist
    /// - The config file cannot be read or parsed
    /// - The platform-specific directory cannot be determined
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            tracing::warn!("Could not determine config path, using defaults");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(NavkitError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                tracing::info!("No config file found at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("{}, using defaults", e.user_message());
                Self::default()
            }
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| NavkitError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = toml::from_str(&content).map_err(|e| NavkitError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().ok_or(NavkitError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| NavkitError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = self.to_toml()?;

        fs::write(path, content).map_err(|e| NavkitError::Io {
            operation: "write",
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| NavkitError::ConfigSerialize { source: e })
    }
}
