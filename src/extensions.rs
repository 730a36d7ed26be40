//! Editor extension lists.

use crate::error::Result;
use std::path::Path;

/// Default extension list file name.
pub const EXTENSIONS_FILE_NAME: &str = "_extensions.txt";

/// Ordered extension identifiers, one per line in the source file.
///
/// Lines are trimmed; blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionList {
    ids: Vec<String>,
}

impl ExtensionList {
    pub fn parse(content: &str) -> Self {
        let ids = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { ids }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}
