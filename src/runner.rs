//! External process execution.

use crate::error::Result;
use crate::session::{EnvChange, Session};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Verbosity levels for output.
/// - 0: progress and warnings only
/// - 1: show commands (-v)
/// - 2+: show commands and exit statuses (-vv)
pub type Verbosity = u8;

/// A program to run, with the environment it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub env: Vec<EnvChange>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: Vec::new(),
        }
    }

    /// Run inside `session`: its search path, active marker and exports.
    pub fn in_session(mut self, session: &Session) -> Result<Self> {
        self.env = session.child_env()?;
        Ok(self)
    }

    /// Arguments as UTF-8 (lossy), mainly for display and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Human readable command line.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.args_lossy() {
            line.push(' ');
            if arg.contains(' ') {
                line.push_str(&format!("\"{}\"", arg));
            } else {
                line.push_str(&arg);
            }
        }
        line
    }
}

/// How a finished process exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code (None if killed by signal).
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Launches processes and looks programs up on a session's search path.
pub trait Runner {
    /// Run to completion. An `Err` means the process could not be started.
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus>;

    /// Find `program` on the session's search path.
    fn locate(&self, program: &str, session: &Session) -> Option<PathBuf> {
        let search_path = session.search_path_var().ok()?;
        let cwd = std::env::current_dir().ok()?;
        which::which_in(program, Some(search_path), cwd).ok()
    }
}

/// Runs real processes, blocking until each exits. Output is inherited.
pub struct SystemRunner {
    verbosity: Verbosity,
}

impl SystemRunner {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn log_execution(&self, invocation: &Invocation) {
        if self.verbosity >= 1 {
            eprintln!("[bootvenv] Executing: {}", invocation.command_line());
        }
    }

    fn log_status(&self, program: &Path, status: &CommandStatus) {
        if self.verbosity >= 2 {
            match status.code {
                Some(code) => eprintln!("[bootvenv] {} exited with {}", program.display(), code),
                None => eprintln!("[bootvenv] {} terminated by signal", program.display()),
            }
        }
    }
}

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandStatus> {
        self.log_execution(invocation);

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        for change in &invocation.env {
            match change {
                EnvChange::Set(name, value) => {
                    cmd.env(name, value);
                }
                EnvChange::Remove(name) => {
                    cmd.env_remove(name);
                }
            }
        }

        let status = CommandStatus {
            code: cmd.status()?.code(),
        };
        self.log_status(&invocation.program, &status);
        Ok(status)
    }
}
