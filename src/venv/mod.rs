//! Virtual environment descriptions and layouts.
//!
//! Nothing here touches the filesystem beyond existence checks; creation
//! and installation go through [`crate::provision`].

mod layout;
mod spec;

pub use layout::{VenvLayout, SCRIPTS_DIR};
pub use spec::{Bitness, EnvironmentSpec};
