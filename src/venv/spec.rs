//! Environment descriptions.

use super::VenvLayout;
use std::fmt;
use std::path::{Path, PathBuf};

/// Which of the two provisioned environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bitness {
    X32,
    X64,
}

impl Bitness {
    /// Both environments, in provisioning order.
    pub const ALL: [Bitness; 2] = [Bitness::X32, Bitness::X64];

    pub fn name(self) -> &'static str {
        match self {
            Bitness::X32 => "x32",
            Bitness::X64 => "x64",
        }
    }

    fn default_path(self) -> &'static str {
        match self {
            Bitness::X32 => ".venv32",
            Bitness::X64 => ".venv",
        }
    }

    fn default_selector(self) -> &'static str {
        match self {
            Bitness::X32 => "-3.11-32",
            Bitness::X64 => "-3.11-64",
        }
    }

    fn default_requirements(self) -> PathBuf {
        let file = match self {
            Bitness::X32 => "_requirements_x32.txt",
            Bitness::X64 => "_requirements_x64.txt",
        };
        Path::new("spm-002").join(file)
    }

    fn default_export_var(self) -> Option<&'static str> {
        match self {
            Bitness::X32 => Some("PYTHON32_PATH"),
            Bitness::X64 => None,
        }
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One environment to provision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentSpec {
    pub bitness: Bitness,
    /// Absolute venv directory.
    pub target_path: PathBuf,
    /// Launcher argument selecting the interpreter (e.g. `-3.11-32`).
    /// Empty means "whatever the launcher picks".
    pub interpreter_selector: String,
    /// Absolute path of the requirements file.
    pub requirements_file: PathBuf,
    /// Variable the interpreter path is exported under, if any.
    pub export_var: Option<String>,
}

impl EnvironmentSpec {
    /// The built-in spec for `bitness`, with paths resolved against `root`.
    pub fn default_for(bitness: Bitness, root: &Path) -> Self {
        Self {
            bitness,
            target_path: root.join(bitness.default_path()),
            interpreter_selector: bitness.default_selector().to_string(),
            requirements_file: root.join(bitness.default_requirements()),
            export_var: bitness.default_export_var().map(str::to_string),
        }
    }

    pub fn layout(&self) -> VenvLayout {
        VenvLayout::new(&self.target_path)
    }
}
