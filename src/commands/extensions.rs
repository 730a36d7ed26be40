//! `bootvenv extensions` command implementation.

use crate::commands::load_plan;
use crate::error::Result;
use crate::provision::Provisioner;
use crate::runner::{SystemRunner, Verbosity};
use crate::session::Session;
use std::path::PathBuf;

/// Arguments for the extensions command.
pub struct ExtensionsArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    /// Extension list overriding the configured one
    pub file: Option<PathBuf>,
    pub verbosity: Verbosity,
}

/// Execute the extensions command.
pub fn execute(args: ExtensionsArgs) -> Result<()> {
    let plan = load_plan(args.root.as_deref(), args.config.as_deref())?;
    let list_path = args.file.unwrap_or_else(|| plan.extensions_file.clone());

    let runner = SystemRunner::new(args.verbosity);
    let provisioner = Provisioner::from_plan(&runner, &plan);
    let session = Session::from_process();

    let installed = provisioner.install_extensions(&list_path, &session)?;
    println!("Processed {} extension(s).", installed.len());

    Ok(())
}
