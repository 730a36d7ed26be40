//! `bootvenv info` command implementation.

use crate::commands::load_plan;
use crate::error::Result;
use crate::extensions::ExtensionList;
use crate::plan::Plan;
use serde::Serialize;
use std::path::PathBuf;

/// Output format for info.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Arguments for the info command.
pub struct InfoArgs {
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

/// On-disk state of one planned environment.
#[derive(Debug, Serialize)]
pub struct EnvironmentStatus {
    pub name: String,
    pub path: PathBuf,
    pub interpreter_selector: String,
    pub python: PathBuf,
    pub exists: bool,
    pub activatable: bool,
    pub requirements_file: PathBuf,
    pub requirements_present: bool,
    pub export_var: Option<String>,
}

/// Everything `info` reports.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub root: PathBuf,
    pub launcher: String,
    pub environments: Vec<EnvironmentStatus>,
    pub extensions_file: PathBuf,
    /// None when the list file does not exist.
    pub extensions: Option<Vec<String>>,
    pub extension_installer: String,
}

impl InfoReport {
    pub fn from_plan(plan: &Plan) -> Result<Self> {
        let environments = plan
            .environments
            .iter()
            .map(|spec| {
                let layout = spec.layout();
                EnvironmentStatus {
                    name: spec.bitness.to_string(),
                    path: spec.target_path.clone(),
                    interpreter_selector: spec.interpreter_selector.clone(),
                    python: layout.python(),
                    exists: layout.exists(),
                    activatable: layout.is_activatable(),
                    requirements_file: spec.requirements_file.clone(),
                    requirements_present: spec.requirements_file.is_file(),
                    export_var: spec.export_var.clone(),
                }
            })
            .collect();

        let extensions = if plan.extensions_file.exists() {
            Some(ExtensionList::load(&plan.extensions_file)?.ids().to_vec())
        } else {
            None
        };

        Ok(Self {
            root: plan.root.clone(),
            launcher: plan.launcher.describe(),
            environments,
            extensions_file: plan.extensions_file.clone(),
            extensions,
            extension_installer: plan.extension_installer.clone(),
        })
    }
}

/// Execute the info command.
pub fn execute(args: InfoArgs) -> Result<()> {
    let plan = load_plan(args.root.as_deref(), args.config.as_deref())?;
    let report = InfoReport::from_plan(&plan)?;

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn print_text(report: &InfoReport) {
    println!("Environment Plan");
    println!("================");
    println!();
    println!("Root:       {}", report.root.display());
    println!("Launcher:   {}", report.launcher);

    for env in &report.environments {
        println!();
        println!("[{}]", env.name);
        println!("  Path:          {}", env.path.display());
        println!("  Selector:      {}", env.interpreter_selector);
        println!("  Interpreter:   {}", env.python.display());
        println!("  Exists:        {}", yes_no(env.exists));
        println!("  Activatable:   {}", yes_no(env.activatable));
        println!(
            "  Requirements:  {} ({})",
            env.requirements_file.display(),
            if env.requirements_present {
                "present"
            } else {
                "missing"
            }
        );
        if let Some(ref var) = env.export_var {
            println!("  Exports:       {}", var);
        }
    }

    println!();
    println!("Extensions");
    println!("----------");
    println!("List:       {}", report.extensions_file.display());
    println!("Installer:  {}", report.extension_installer);
    match &report.extensions {
        Some(ids) if ids.is_empty() => println!("  (list is empty)"),
        Some(ids) => {
            for id in ids {
                println!("  {}", id);
            }
        }
        None => println!("  (list not found)"),
    }
}
