//! `bootvenv setup` command implementation.

use crate::commands::load_plan;
use crate::error::Result;
use crate::provision::Provisioner;
use crate::runner::{SystemRunner, Verbosity};
use crate::session::Session;
use std::path::PathBuf;

/// Arguments for the setup command.
pub struct SetupArgs {
    /// Project root
    pub root: Option<PathBuf>,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
    /// Skip the editor extension step
    pub skip_extensions: bool,
    /// Verbosity level
    pub verbosity: Verbosity,
}

/// Execute the setup command.
pub fn execute(args: SetupArgs) -> Result<()> {
    let plan = load_plan(args.root.as_deref(), args.config.as_deref())?;
    let runner = SystemRunner::new(args.verbosity);
    let provisioner = Provisioner::from_plan(&runner, &plan);
    let mut session = Session::from_process();

    let report = provisioner.setup(&plan, &mut session, args.skip_extensions)?;

    println!();
    for (bitness, python) in &report.interpreters {
        println!("{} interpreter: {}", bitness, python.display());
    }
    for (name, value) in session.exports() {
        println!("Exported {}={}", name, value);
    }
    if !report.extensions.is_empty() {
        println!("Extensions:     {}", report.extensions.join(", "));
    }
    if let Some(active) = session.active() {
        println!("Active environment: {}", active.root().display());
    }
    println!();
    println!("Environment setup complete.");
    println!("Run `bootvenv shellenv` to apply the environment to your shell.");

    Ok(())
}
