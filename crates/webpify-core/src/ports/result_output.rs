//! Result output port for writing per-file reports.

use crate::domain::ProcessingResult;

/// Port for emitting processing results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single result.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, result: &ProcessingResult) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
