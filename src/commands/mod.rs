//! Command implementations.

pub mod env;
pub mod extensions;
pub mod info;
pub mod setup;
pub mod shellenv;

use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::Result;
use crate::plan::Plan;
use std::path::{Path, PathBuf};

/// Resolve the plan.
///
/// Paths in a configuration file are relative to the directory holding it.
/// - `root` given: its own bootvenv.toml (or `config`) is used, paths
///   resolve against `root`.
/// - `config` given: paths resolve against the file's directory.
/// - neither: the nearest bootvenv.toml in the current directory or its
///   parents decides the root; without one, the current directory is the
///   root and the built-in defaults apply.
pub fn load_plan(root: Option<&Path>, config: Option<&Path>) -> Result<Plan> {
    let cwd = std::env::current_dir()?;

    let (config, config_dir) = match (config, root) {
        (Some(path), _) => (Config::load_file(path)?, parent_dir(path)),
        (None, Some(root)) => {
            let path = root.join(CONFIG_FILE_NAME);
            if path.is_file() {
                (Config::load_file(&path)?, None)
            } else {
                (Config::default(), None)
            }
        }
        (None, None) => match Config::find(&cwd) {
            Some(path) => (Config::load_file(&path)?, parent_dir(&path)),
            None => (Config::default(), None),
        },
    };

    let root = root
        .map(Path::to_path_buf)
        .or(config_dir)
        .unwrap_or(cwd);
    Plan::new(&root, &config)
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venv::Bitness;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_root_ignores_parent_config() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[x32]\npath = \"py32\"\n",
        )
        .unwrap();
        let nested = temp.path().join("spm-002");
        fs::create_dir(&nested).unwrap();

        let plan = load_plan(Some(&nested), None).unwrap();
        let x32 = plan.environment(Bitness::X32).unwrap();
        assert_eq!(x32.target_path, plan.root.join(".venv32"));
        assert!(plan.root.ends_with("spm-002"));
    }

    #[test]
    fn test_explicit_config_resolves_against_its_directory() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("setup").join("lab.toml");
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "[x32]\npath = \"py32\"\n").unwrap();

        let plan = load_plan(None, Some(&config_path)).unwrap();
        let x32 = plan.environment(Bitness::X32).unwrap();
        assert_eq!(x32.target_path, temp.path().join("setup").join("py32"));
    }

    #[test]
    fn test_root_wins_over_explicit_config_directory() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("setup").join("lab.toml");
        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, "").unwrap();

        let plan = load_plan(Some(temp.path()), Some(&config_path)).unwrap();
        assert_eq!(
            plan.environment(Bitness::X64).unwrap().target_path,
            temp.path().join(".venv")
        );
    }
}
