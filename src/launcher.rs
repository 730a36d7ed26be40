//! Interpreter launcher detection.

use crate::runner::Runner;
use crate::session::Session;
use std::path::{Path, PathBuf};

/// Default launcher program name: the Python launcher on Windows.
#[cfg(windows)]
pub const DEFAULT_LAUNCHER: &str = "py";
#[cfg(not(windows))]
pub const DEFAULT_LAUNCHER: &str = "python3";

/// The program used to create venvs with a chosen interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launcher {
    /// Looked up on the search path, then in default install locations.
    Name(String),
    /// Used as given.
    Path(PathBuf),
}

impl Default for Launcher {
    fn default() -> Self {
        Launcher::Name(DEFAULT_LAUNCHER.to_string())
    }
}

impl Launcher {
    /// Interpret a configured value: anything with a directory part is a path.
    pub fn from_setting(value: &str, root: &Path) -> Self {
        let path = Path::new(value);
        if path.is_absolute() || path.components().count() > 1 {
            Launcher::Path(root.join(path))
        } else {
            Launcher::Name(value.to_string())
        }
    }

    /// Short description for messages.
    pub fn describe(&self) -> String {
        match self {
            Launcher::Name(name) => name.clone(),
            Launcher::Path(path) => path.display().to_string(),
        }
    }
}

/// Returns platform-specific default launcher locations.
fn default_paths() -> Vec<PathBuf> {
    #[cfg(windows)]
    {
        let mut paths = Vec::new();

        if let Some(root) = std::env::var_os("SystemRoot") {
            paths.push(PathBuf::from(root).join("py.exe"));
        }
        paths.push(PathBuf::from(r"C:\Windows\py.exe"));

        if let Some(local) = dirs::data_local_dir() {
            paths.push(local.join(r"Programs\Python\Launcher\py.exe"));
        }

        paths
    }

    #[cfg(not(windows))]
    {
        let mut paths = vec![
            PathBuf::from("/usr/bin/python3"),
            PathBuf::from("/usr/local/bin/python3"),
        ];

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".local/bin/python3"));
        }

        paths
    }
}

/// Check if a path is executable.
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(windows)]
fn is_executable(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| {
                let ext = ext.to_string_lossy().to_lowercase();
                ext == "exe" || ext == "bat" || ext == "cmd"
            })
            .unwrap_or(false)
}

#[cfg(not(any(unix, windows)))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Attempt to find the launcher executable.
///
/// Detection order:
/// 1. Explicit path, if configured
/// 2. Search path of the session (via `which`)
/// 3. Platform-specific default paths (default launcher name only)
pub fn find_launcher(
    launcher: &Launcher,
    runner: &dyn Runner,
    session: &Session,
) -> Option<PathBuf> {
    match launcher {
        Launcher::Path(path) => is_executable(path).then(|| path.clone()),
        Launcher::Name(name) => {
            if let Some(path) = runner.locate(name, session) {
                return Some(path);
            }
            if name != DEFAULT_LAUNCHER {
                return None;
            }
            default_paths()
                .into_iter()
                .find(|path| is_executable(path))
        }
    }
}
