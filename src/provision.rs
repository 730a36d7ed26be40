//! Environment provisioning.
//!
//! Every step blocks on the process it starts and the first fatal error
//! aborts the run. Missing requirements files, a missing extension list and
//! a missing extension installer only produce warnings.

use crate::error::{BootvenvError, Result};
use crate::extensions::ExtensionList;
use crate::launcher::{find_launcher, Launcher};
use crate::plan::Plan;
use crate::runner::{Invocation, Runner};
use crate::session::Session;
use crate::venv::{Bitness, EnvironmentSpec};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Outcome of a full setup run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// Interpreter of each environment, in provisioning order.
    pub interpreters: Vec<(Bitness, PathBuf)>,
    /// Extension identifiers the installer was invoked for.
    pub extensions: Vec<String>,
}

/// Creates, activates and populates environments.
pub struct Provisioner<'a> {
    runner: &'a dyn Runner,
    launcher: Launcher,
    extension_installer: String,
}

impl<'a> Provisioner<'a> {
    pub fn new(runner: &'a dyn Runner, launcher: Launcher, extension_installer: String) -> Self {
        Self {
            runner,
            launcher,
            extension_installer,
        }
    }

    pub fn from_plan(runner: &'a dyn Runner, plan: &Plan) -> Self {
        Self::new(
            runner,
            plan.launcher.clone(),
            plan.extension_installer.clone(),
        )
    }

    /// Make sure `spec` exists, activate it in `session`, and install its
    /// dependencies. Returns the absolute path of its interpreter.
    pub fn ensure_environment(
        &self,
        spec: &EnvironmentSpec,
        session: &mut Session,
    ) -> Result<PathBuf> {
        let layout = spec.layout();

        if layout.exists() {
            println!(
                "Using existing {} environment at {}",
                spec.bitness,
                layout.root().display()
            );
        } else {
            println!(
                "Creating {} environment at {}...",
                spec.bitness,
                layout.root().display()
            );
            self.create(spec, session)?;
        }

        if !layout.is_activatable() {
            return Err(BootvenvError::ActivationScriptMissing(
                layout.activation_script(),
            ));
        }

        session.activate(&layout);
        let python = std::path::absolute(layout.python())?;

        println!("Upgrading pip in {}...", spec.bitness);
        self.pip(&python, ["install", "--upgrade", "pip"], session)?;

        if spec.requirements_file.is_file() {
            println!(
                "Installing {} requirements from {}...",
                spec.bitness,
                spec.requirements_file.display()
            );
            let args: [OsString; 3] = [
                "install".into(),
                "-r".into(),
                spec.requirements_file.clone().into(),
            ];
            self.pip(&python, args, session)?;
        } else {
            eprintln!(
                "Warning: requirements file {} not found, skipping dependency install",
                spec.requirements_file.display()
            );
        }

        if let Some(var) = &spec.export_var {
            session.export(var.clone(), python.to_string_lossy());
        }

        Ok(python)
    }

    /// Invoke the extension installer once per identifier in `list_path`.
    ///
    /// Failures of individual installs are reported and skipped.
    pub fn install_extensions(&self, list_path: &Path, session: &Session) -> Result<Vec<String>> {
        if !list_path.exists() {
            eprintln!(
                "Warning: extension list {} not found, skipping extensions",
                list_path.display()
            );
            return Ok(Vec::new());
        }

        let Some(installer) = self.runner.locate(&self.extension_installer, session) else {
            eprintln!(
                "Warning: '{}' not found on PATH, skipping extensions",
                self.extension_installer
            );
            return Ok(Vec::new());
        };

        let list = ExtensionList::load(list_path)?;
        let mut attempted = Vec::with_capacity(list.ids().len());

        for id in list.ids() {
            println!("Installing extension {}...", id);
            let invocation = Invocation::new(&installer, ["--install-extension", id.as_str()])
                .in_session(session)?;
            match self.runner.run(&invocation) {
                Ok(status) if status.success() => {}
                Ok(status) => eprintln!(
                    "Warning: installing extension {} failed (exit code {:?})",
                    id, status.code
                ),
                Err(e) => eprintln!("Warning: installing extension {} failed: {}", id, e),
            }
            attempted.push(id.clone());
        }

        Ok(attempted)
    }

    /// Provision every environment of `plan` in order, then extensions.
    pub fn setup(
        &self,
        plan: &Plan,
        session: &mut Session,
        skip_extensions: bool,
    ) -> Result<SetupReport> {
        let mut report = SetupReport::default();

        for spec in &plan.environments {
            let python = self.ensure_environment(spec, session)?;
            report.interpreters.push((spec.bitness, python));
        }

        if !skip_extensions {
            report.extensions = self.install_extensions(&plan.extensions_file, session)?;
        }

        Ok(report)
    }

    fn create(&self, spec: &EnvironmentSpec, session: &Session) -> Result<()> {
        let creation_error = |reason: String| BootvenvError::EnvironmentCreation {
            path: spec.target_path.clone(),
            reason,
        };

        // The launcher must not resolve to whichever venv is currently active.
        let mut clean = session.clone();
        clean.deactivate();

        let launcher = find_launcher(&self.launcher, self.runner, &clean).ok_or_else(|| {
            creation_error(format!(
                "interpreter launcher '{}' not found",
                self.launcher.describe()
            ))
        })?;

        let mut args: Vec<OsString> = Vec::new();
        if !spec.interpreter_selector.is_empty() {
            args.push(spec.interpreter_selector.clone().into());
        }
        args.push("-m".into());
        args.push("venv".into());
        args.push(spec.target_path.clone().into());

        let invocation = Invocation::new(launcher, args).in_session(&clean)?;
        let status = self
            .runner
            .run(&invocation)
            .map_err(|e| creation_error(format!("{}: {}", invocation.command_line(), e)))?;

        if !status.success() {
            return Err(creation_error(format!(
                "{} exited with code {:?}",
                invocation.command_line(),
                status.code
            )));
        }

        Ok(())
    }

    fn pip<I, S>(&self, python: &Path, args: I, session: &Session) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut full: Vec<OsString> = vec!["-m".into(), "pip".into()];
        full.extend(args.into_iter().map(Into::into));

        let invocation = Invocation::new(python, full).in_session(session)?;
        let status = self.runner.run(&invocation).map_err(|e| {
            BootvenvError::InstallerFailure(format!("{}: {}", invocation.command_line(), e))
        })?;

        if !status.success() {
            return Err(BootvenvError::InstallerFailure(format!(
                "{} exited with code {:?}",
                invocation.command_line(),
                status.code
            )));
        }

        Ok(())
    }
}
