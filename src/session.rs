//! Explicit process environment state.
//!
//! Activation of a venv only affects the shell it runs in, and only one
//! environment can be active at a time. [`Session`] holds that state as a
//! value: the search path, the active environment marker and any exported
//! variables. Every spawned process receives it through [`Session::child_env`];
//! the real process environment is never mutated.

use crate::error::{BootvenvError, Result};
use crate::venv::VenvLayout;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Variable marking the active environment.
pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

/// A change applied to a child process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvChange {
    Set(String, OsString),
    Remove(String),
}

/// Shells [`Session::render`] can emit for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellKind {
    PowerShell,
    Cmd,
    Posix,
}

impl ShellKind {
    /// The shell most likely in use on this platform.
    pub fn native() -> Self {
        if cfg!(windows) {
            ShellKind::PowerShell
        } else {
            ShellKind::Posix
        }
    }
}

/// Search path, active environment and exports of one provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    search_path: Vec<PathBuf>,
    active: Option<VenvLayout>,
    exports: BTreeMap<String, String>,
}

impl Session {
    /// Session with the given search path and nothing active.
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self {
            search_path,
            ..Self::default()
        }
    }

    /// Snapshot `PATH` and `VIRTUAL_ENV` from the current process.
    pub fn from_process() -> Self {
        let search_path = std::env::var_os("PATH")
            .map(|p| std::env::split_paths(&p).collect())
            .unwrap_or_default();
        let active = std::env::var_os(VIRTUAL_ENV)
            .filter(|v| !v.is_empty())
            .map(VenvLayout::new);
        Self {
            search_path,
            active,
            exports: BTreeMap::new(),
        }
    }

    pub fn search_path(&self) -> &[PathBuf] {
        &self.search_path
    }

    /// The active environment, if any.
    pub fn active(&self) -> Option<&VenvLayout> {
        self.active.as_ref()
    }

    pub fn exports(&self) -> &BTreeMap<String, String> {
        &self.exports
    }

    /// Make `layout` the active environment.
    ///
    /// The previously active environment's scripts directory leaves the
    /// search path and the new one is put in front of it.
    pub fn activate(&mut self, layout: &VenvLayout) {
        self.deactivate();
        let scripts = layout.scripts_dir();
        self.search_path.retain(|p| p != &scripts);
        self.search_path.insert(0, scripts);
        self.active = Some(layout.clone());
    }

    /// Drop the active environment and its scripts directory from the
    /// search path. Exports are kept.
    pub fn deactivate(&mut self) {
        if let Some(previous) = self.active.take() {
            let old = previous.scripts_dir();
            self.search_path.retain(|p| p != &old);
        }
    }

    /// Export `name=value` to every later child process.
    pub fn export(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.exports.insert(name.into(), value.into());
    }

    /// The search path joined with the platform separator.
    pub fn search_path_var(&self) -> Result<OsString> {
        std::env::join_paths(&self.search_path).map_err(|e| {
            BootvenvError::ConfigError(format!("search path entry cannot be joined: {}", e))
        })
    }

    /// Environment changes applied to every spawned process.
    pub fn child_env(&self) -> Result<Vec<EnvChange>> {
        let mut changes = vec![EnvChange::Set("PATH".into(), self.search_path_var()?)];
        if let Some(active) = &self.active {
            changes.push(EnvChange::Set(
                VIRTUAL_ENV.into(),
                active.root().as_os_str().to_os_string(),
            ));
            changes.push(EnvChange::Remove("PYTHONHOME".into()));
        } else {
            changes.push(EnvChange::Remove(VIRTUAL_ENV.into()));
        }
        for (name, value) in &self.exports {
            changes.push(EnvChange::Set(name.clone(), value.into()));
        }
        Ok(changes)
    }

    /// Shell snippet reproducing this session in a parent shell.
    ///
    /// `Cmd` output is batch syntax: save it to a `.bat` file and `call` it.
    ///
    /// The active environment is sourced through its own activation
    /// script so the shell's prompt and `deactivate` work as usual.
    pub fn render(&self, shell: ShellKind) -> String {
        let mut out = String::new();
        if let Some(active) = &self.active {
            let scripts = active.scripts_dir();
            let line = match shell {
                ShellKind::PowerShell => {
                    format!(". {}", ps_quote(&path_str(&scripts.join("Activate.ps1"))))
                }
                ShellKind::Cmd => {
                    let script = path_str(&scripts.join("activate.bat"));
                    format!("call \"{}\"", cmd_escape(&script))
                }
                ShellKind::Posix => {
                    format!(". {}", sh_quote(&path_str(&scripts.join("activate"))))
                }
            };
            out.push_str(&line);
            out.push('\n');
        }
        for (name, value) in &self.exports {
            let line = match shell {
                ShellKind::PowerShell => format!("$env:{} = {}", name, ps_quote(value)),
                ShellKind::Cmd => format!("set \"{}={}\"", name, cmd_escape(value)),
                ShellKind::Posix => format!("export {}={}", name, sh_quote(value)),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn ps_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if matches!(ch, '"' | '`' | '$') {
            quoted.push('`');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Batch files expand `%`; the snippet is meant to be saved and `call`ed.
fn cmd_escape(value: &str) -> String {
    value.replace('%', "%%")
}

fn sh_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
