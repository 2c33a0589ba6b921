//! Error types.
//!
//! Navigation itself never fails: a rejected URL is a silent no-op. The
//! types here describe why a URL was rejected (for logging and the CLI) and
//! what went wrong while loading or saving configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Reason a raw URL could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlRejection {
    /// Input was empty or whitespace only.
    #[error("URL is empty")]
    Empty,

    /// Input could not be parsed as a URL.
    #[error("'{input}' is not a valid URL")]
    Invalid {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// Scheme is not in the configured allow-list.
    #[error("scheme '{scheme}' is not allowed")]
    SchemeNotAllowed { scheme: String },
}

/// Configuration error.
#[derive(Debug, Error)]
pub enum NavkitError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML or has the wrong shape.
    #[error("Invalid configuration file: {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration could not be serialized.
    #[error("Failed to serialize configuration")]
    ConfigSerialize {
        #[source]
        source: toml::ser::Error,
    },

    /// No platform configuration directory could be determined.
    #[error("Could not determine the configuration directory")]
    NoConfigDir,
}

impl NavkitError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::ConfigParse { path, source } => {
                format!(
                    "The configuration file at {} could not be read: {}",
                    path.display(),
                    source.message()
                )
            }
            Self::ConfigSerialize { .. } => {
                "An error occurred while writing the configuration.".to_string()
            }
            Self::NoConfigDir => {
                "No configuration directory is available on this platform.".to_string()
            }
        }
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, NavkitError>;
