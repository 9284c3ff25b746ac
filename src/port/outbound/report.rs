//! Output port for the list of updated markets.

use crate::error::Result;

/// Records the names of markets updated during an automatic pass.
pub trait UpdateReport: Send + Sync {
    /// Persist `names`, one per line, replacing any previous report.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn write(&self, names: &[String]) -> Result<()>;
}
