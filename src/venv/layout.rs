//! On-disk layout of a virtual environment.

use std::path::{Path, PathBuf};

/// Name of the directory holding the environment's executables.
#[cfg(windows)]
pub const SCRIPTS_DIR: &str = "Scripts";
#[cfg(not(windows))]
pub const SCRIPTS_DIR: &str = "bin";

#[cfg(windows)]
const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
const PYTHON_EXE: &str = "python";

#[cfg(windows)]
const ACTIVATE_SCRIPT: &str = "Activate.ps1";
#[cfg(not(windows))]
const ACTIVATE_SCRIPT: &str = "activate";

/// Paths inside a venv directory, for the current platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenvLayout {
    root: PathBuf,
}

impl VenvLayout {
    /// Describe the venv rooted at `root`. Nothing is checked on disk.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The venv directory itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Scripts/` on Windows, `bin/` elsewhere.
    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join(SCRIPTS_DIR)
    }

    /// The environment's interpreter executable.
    pub fn python(&self) -> PathBuf {
        self.scripts_dir().join(PYTHON_EXE)
    }

    /// The activation entry point written by `python -m venv`.
    pub fn activation_script(&self) -> PathBuf {
        self.scripts_dir().join(ACTIVATE_SCRIPT)
    }

    /// Whether the venv directory exists.
    pub fn exists(&self) -> bool {
        self.root.exists()
    }

    /// Whether the activation entry point exists.
    pub fn is_activatable(&self) -> bool {
        self.activation_script().is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths_are_under_root() {
        let layout = VenvLayout::new("/work/.venv32");
        assert!(layout.scripts_dir().starts_with("/work/.venv32"));
        assert!(layout.python().starts_with(layout.scripts_dir()));
        assert!(layout.activation_script().starts_with(layout.scripts_dir()));
    }

    #[cfg(windows)]
    #[test]
    fn test_windows_layout() {
        let layout = VenvLayout::new(r"C:\work\.venv32");
        assert_eq!(
            layout.python(),
            PathBuf::from(r"C:\work\.venv32\Scripts\python.exe")
        );
        assert_eq!(
            layout.activation_script(),
            PathBuf::from(r"C:\work\.venv32\Scripts\Activate.ps1")
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_unix_layout() {
        let layout = VenvLayout::new("/work/.venv");
        assert_eq!(layout.python(), PathBuf::from("/work/.venv/bin/python"));
        assert_eq!(
            layout.activation_script(),
            PathBuf::from("/work/.venv/bin/activate")
        );
    }

    #[test]
    fn test_activatable_requires_script_file() {
        let temp = TempDir::new().unwrap();
        let layout = VenvLayout::new(temp.path().join(".venv"));
        assert!(!layout.exists());
        assert!(!layout.is_activatable());

        fs::create_dir_all(layout.scripts_dir()).unwrap();
        assert!(layout.exists());
        assert!(!layout.is_activatable());

        fs::write(layout.activation_script(), "").unwrap();
        assert!(layout.is_activatable());
    }
}
