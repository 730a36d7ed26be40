//! Configuration file handling for bootvenv.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The configuration file name.
pub const CONFIG_FILE_NAME: &str = "bootvenv.toml";

/// Configuration from bootvenv.toml. Every field overrides a built-in default.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Interpreter launcher, as a program name ("py") or a path
    pub launcher: Option<String>,

    /// Extension list file (default: "_extensions.txt")
    pub extensions_file: Option<PathBuf>,

    /// Extension installer command (default: "code")
    pub extension_installer: Option<String>,

    /// Overrides for the 32-bit environment
    #[serde(default)]
    pub x32: EnvironmentConfig,

    /// Overrides for the 64-bit environment
    #[serde(default)]
    pub x64: EnvironmentConfig,
}

/// Per-environment overrides.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Venv directory
    pub path: Option<PathBuf>,

    /// Launcher selector (e.g. "-3.12-32")
    pub interpreter: Option<String>,

    /// Requirements file
    pub requirements: Option<PathBuf>,

    /// Variable to export the interpreter path under ("" disables)
    pub export_var: Option<String>,
}

impl Config {
    /// Load configuration from bootvenv.toml in the given directory or its parents.
    ///
    /// Returns `Ok(None)` if no configuration file is found.
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        match Self::find(start_dir) {
            Some(config_path) => Self::load_file(&config_path).map(Some),
            None => Ok(None),
        }
    }

    /// Path of the nearest bootvenv.toml in `start_dir` or its parents.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        let mut current = start_dir
            .canonicalize()
            .unwrap_or_else(|_| start_dir.to_path_buf());

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.is_file() {
                return Some(config_path);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}
