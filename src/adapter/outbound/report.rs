//! Flat-file report of updated markets.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::port::outbound::report::UpdateReport;

/// Writes one market name per line to a file, truncating it first.
#[derive(Debug, Clone)]
pub struct FileReport {
    path: PathBuf,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UpdateReport for FileReport {
    fn write(&self, names: &[String]) -> Result<()> {
        let mut content = names.join("\n");
        if !content.is_empty() {
            content.push('\n');
        }
        std::fs::write(&self.path, content)?;
        info!(path = %self.path.display(), count = names.len(), "Wrote updated markets");
        Ok(())
    }
}
