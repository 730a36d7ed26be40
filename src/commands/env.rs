//! `bootvenv env` command implementation.

use crate::commands::load_plan;
use crate::error::{BootvenvError, Result};
use crate::provision::Provisioner;
use crate::runner::{SystemRunner, Verbosity};
use crate::session::Session;
use crate::venv::Bitness;
use std::path::PathBuf;

/// Arguments for the env command.
pub struct EnvArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub bitness: Bitness,
    pub verbosity: Verbosity,
}

/// Execute the env command: provision a single environment.
pub fn execute(args: EnvArgs) -> Result<()> {
    let plan = load_plan(args.root.as_deref(), args.config.as_deref())?;
    let spec = plan.environment(args.bitness).ok_or_else(|| {
        BootvenvError::ConfigError(format!("no {} environment configured", args.bitness))
    })?;

    let runner = SystemRunner::new(args.verbosity);
    let provisioner = Provisioner::from_plan(&runner, &plan);
    let mut session = Session::from_process();

    let python = provisioner.ensure_environment(spec, &mut session)?;

    println!();
    println!("{} interpreter: {}", spec.bitness, python.display());
    if let Some(var) = &spec.export_var {
        println!("Exported {}={}", var, python.display());
    }

    Ok(())
}
