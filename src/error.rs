//! Error types for bootvenv.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bootvenv operations.
pub type Result<T> = std::result::Result<T, BootvenvError>;

/// Errors that can occur while provisioning environments.
///
/// Every variant is fatal: the first one raised aborts the run.
#[derive(Error, Debug)]
pub enum BootvenvError {
    #[error("Failed to create environment at {path}: {reason}")]
    EnvironmentCreation { path: PathBuf, reason: String },

    #[error("Activation script missing: {0}")]
    ActivationScriptMissing(PathBuf),

    #[error("Installer failed: {0}")]
    InstallerFailure(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
