//! bootvenv - dual Python environment bootstrapper
//!
//! Provisions a 32-bit and a 64-bit virtual environment for a project,
//! installs their requirements, and installs editor extensions.

pub mod commands;
pub mod config;
pub mod error;
pub mod extensions;
pub mod launcher;
pub mod plan;
pub mod provision;
pub mod runner;
pub mod session;
pub mod venv;

pub use config::Config;
pub use error::{BootvenvError, Result};
pub use plan::Plan;
pub use provision::Provisioner;
pub use session::Session;
