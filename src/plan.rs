//! Resolved provisioning plan: built-in defaults plus configuration.

use crate::config::{Config, EnvironmentConfig};
use crate::error::{BootvenvError, Result};
use crate::extensions::EXTENSIONS_FILE_NAME;
use crate::launcher::Launcher;
use crate::venv::{Bitness, EnvironmentSpec};
use std::path::{Path, PathBuf};

/// Default extension installer command.
pub const DEFAULT_EXTENSION_INSTALLER: &str = "code";

/// Everything a setup run needs, with all paths absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub root: PathBuf,
    /// x32 then x64.
    pub environments: Vec<EnvironmentSpec>,
    pub launcher: Launcher,
    pub extensions_file: PathBuf,
    pub extension_installer: String,
}

impl Plan {
    /// Resolve `config` against `root`.
    pub fn new(root: &Path, config: &Config) -> Result<Self> {
        let root = std::path::absolute(root)?;

        let environments = Bitness::ALL
            .iter()
            .map(|&bitness| {
                let overrides = match bitness {
                    Bitness::X32 => &config.x32,
                    Bitness::X64 => &config.x64,
                };
                resolve_environment(bitness, &root, overrides)
            })
            .collect::<Result<Vec<_>>>()?;

        let launcher = match config.launcher.as_deref() {
            Some(value) if value.trim().is_empty() => {
                return Err(BootvenvError::ConfigError("launcher must not be empty".into()))
            }
            Some(value) => Launcher::from_setting(value, &root),
            None => Launcher::default(),
        };

        let extensions_file = root.join(
            config
                .extensions_file
                .as_deref()
                .unwrap_or(Path::new(EXTENSIONS_FILE_NAME)),
        );

        let extension_installer = config
            .extension_installer
            .clone()
            .unwrap_or_else(|| DEFAULT_EXTENSION_INSTALLER.to_string());
        if extension_installer.trim().is_empty() {
            return Err(BootvenvError::ConfigError(
                "extension_installer must not be empty".into(),
            ));
        }

        Ok(Self {
            root,
            environments,
            launcher,
            extensions_file,
            extension_installer,
        })
    }

    /// Plan with built-in defaults only.
    pub fn with_defaults(root: &Path) -> Result<Self> {
        Self::new(root, &Config::default())
    }

    pub fn environment(&self, bitness: Bitness) -> Option<&EnvironmentSpec> {
        self.environments.iter().find(|e| e.bitness == bitness)
    }
}

fn resolve_environment(
    bitness: Bitness,
    root: &Path,
    overrides: &EnvironmentConfig,
) -> Result<EnvironmentSpec> {
    let mut spec = EnvironmentSpec::default_for(bitness, root);

    if let Some(path) = &overrides.path {
        spec.target_path = root.join(path);
    }
    if let Some(selector) = &overrides.interpreter {
        spec.interpreter_selector = selector.trim().to_string();
    }
    if let Some(requirements) = &overrides.requirements {
        spec.requirements_file = root.join(requirements);
    }
    if let Some(var) = &overrides.export_var {
        spec.export_var = if var.is_empty() {
            None
        } else {
            validate_var_name(var)?;
            Some(var.clone())
        };
    }

    Ok(spec)
}

fn validate_var_name(name: &str) -> Result<()> {
    let valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(BootvenvError::ConfigError(format!(
            "invalid export variable name '{}'",
            name
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_plan() {
        let temp = TempDir::new().unwrap();
        let plan = Plan::with_defaults(temp.path()).unwrap();

        assert_eq!(plan.environments.len(), 2);
        assert_eq!(plan.environments[0].bitness, Bitness::X32);
        assert_eq!(plan.environments[1].bitness, Bitness::X64);
        assert!(plan.environments[0].target_path.ends_with(".venv32"));
        assert!(plan.extensions_file.ends_with(EXTENSIONS_FILE_NAME));
        assert_eq!(plan.extension_installer, "code");
        assert_eq!(plan.launcher, Launcher::default());
    }

    #[test]
    fn test_overrides_apply_per_environment() {
        let temp = TempDir::new().unwrap();
        let config = Config::from_toml(
            r#"
[x32]
path = "py32"
interpreter = " -3.12-32 "
export_var = ""

[x64]
requirements = "req/x64.txt"
export_var = "PYTHON64_PATH"
"#,
        )
        .unwrap();
        let plan = Plan::new(temp.path(), &config).unwrap();

        let x32 = plan.environment(Bitness::X32).unwrap();
        assert_eq!(x32.target_path, plan.root.join("py32"));
        assert_eq!(x32.interpreter_selector, "-3.12-32");
        assert!(x32.export_var.is_none());

        let x64 = plan.environment(Bitness::X64).unwrap();
        assert_eq!(x64.requirements_file, plan.root.join("req/x64.txt"));
        assert_eq!(x64.export_var.as_deref(), Some("PYTHON64_PATH"));
        assert!(x64.target_path.ends_with(".venv"));
    }

    #[test]
    fn test_invalid_export_var_rejected() {
        let temp = TempDir::new().unwrap();
        let config = Config::from_toml("[x64]\nexport_var = \"1BAD-NAME\"").unwrap();
        let err = Plan::new(temp.path(), &config).unwrap_err();
        assert!(matches!(err, BootvenvError::ConfigError(_)));
    }

    #[test]
    fn test_empty_installer_rejected() {
        let temp = TempDir::new().unwrap();
        let config = Config::from_toml("extension_installer = \" \"").unwrap();
        assert!(Plan::new(temp.path(), &config).is_err());
    }

    #[test]
    fn test_launcher_setting() {
        let temp = TempDir::new().unwrap();
        let config = Config::from_toml("launcher = \"python3.11\"").unwrap();
        let plan = Plan::new(temp.path(), &config).unwrap();
        assert_eq!(plan.launcher, Launcher::Name("python3.11".into()));
    }
}
