//! bootvenv CLI entry point.

use bootvenv::commands::{env, extensions, info, setup, shellenv};
use bootvenv::error::Result;
use bootvenv::session::ShellKind;
use bootvenv::venv::Bitness;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bootvenv")]
#[command(about = "Provision 32-bit and 64-bit Python environments")]
#[command(version)]
struct Cli {
    /// Subcommand (default: setup)
    #[command(subcommand)]
    command: Option<Command>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project root the environment paths are relative to
    /// (default: directory of the nearest bootvenv.toml, else the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Configuration file (default: nearest bootvenv.toml)
    #[arg(long, global = true, env = "BOOTVENV_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Provision both environments, then install editor extensions
    Setup {
        /// Skip installing editor extensions
        #[arg(long)]
        skip_extensions: bool,
    },

    /// Provision a single environment
    Env {
        /// Environment to provision
        #[arg(value_enum)]
        bitness: BitnessArg,
    },

    /// Install editor extensions from the extension list
    Extensions {
        /// Extension list file (overrides configuration)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the planned environments and their state
    Info {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print shell commands that activate the environments
    Shellenv {
        /// Shell to emit for (default: platform shell)
        #[arg(short, long)]
        shell: Option<ShellArg>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BitnessArg {
    X32,
    X64,
}

impl From<BitnessArg> for Bitness {
    fn from(b: BitnessArg) -> Self {
        match b {
            BitnessArg::X32 => Bitness::X32,
            BitnessArg::X64 => Bitness::X64,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for info::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => info::OutputFormat::Text,
            OutputFormat::Json => info::OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ShellArg {
    Powershell,
    Cmd,
    Posix,
}

impl From<ShellArg> for ShellKind {
    fn from(s: ShellArg) -> Self {
        match s {
            ShellArg::Powershell => ShellKind::PowerShell,
            ShellArg::Cmd => ShellKind::Cmd,
            ShellArg::Posix => ShellKind::Posix,
        }
    }
}

fn main() {
    if let Err(e) = run_cli() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = cli.verbose;
    let root = cli.root;
    let config = cli.config;

    match cli.command.unwrap_or(Command::Setup {
        skip_extensions: false,
    }) {
        Command::Setup { skip_extensions } => setup::execute(setup::SetupArgs {
            root,
            config,
            skip_extensions,
            verbosity,
        }),

        Command::Env { bitness } => env::execute(env::EnvArgs {
            root,
            config,
            bitness: bitness.into(),
            verbosity,
        }),

        Command::Extensions { file } => extensions::execute(extensions::ExtensionsArgs {
            root,
            config,
            file,
            verbosity,
        }),

        Command::Info { format } => info::execute(info::InfoArgs {
            root,
            config,
            format: format.into(),
        }),

        Command::Shellenv { shell } => shellenv::execute(shellenv::ShellenvArgs {
            root,
            config,
            shell: shell.map(ShellKind::from).unwrap_or_else(ShellKind::native),
        }),

        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "bootvenv", &mut io::stdout());
            Ok(())
        }
    }
}
