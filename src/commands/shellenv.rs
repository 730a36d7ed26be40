//! `bootvenv shellenv` command implementation.
//!
//! A child process cannot change its parent's environment, so this prints
//! a snippet for the calling shell to evaluate: the x64 environment is
//! activated last and the configured interpreter paths are exported.

use crate::commands::load_plan;
use crate::error::{BootvenvError, Result};
use crate::session::{Session, ShellKind};
use std::path::PathBuf;

/// Arguments for the shellenv command.
pub struct ShellenvArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub shell: ShellKind,
}

/// Execute the shellenv command.
pub fn execute(args: ShellenvArgs) -> Result<()> {
    let plan = load_plan(args.root.as_deref(), args.config.as_deref())?;
    let mut session = Session::from_process();

    for spec in &plan.environments {
        let layout = spec.layout();
        if !layout.is_activatable() {
            return Err(BootvenvError::ActivationScriptMissing(
                layout.activation_script(),
            ));
        }
        session.activate(&layout);
        if let Some(var) = &spec.export_var {
            session.export(var.clone(), layout.python().to_string_lossy());
        }
    }

    print!("{}", session.render(args.shell));
    Ok(())
}
