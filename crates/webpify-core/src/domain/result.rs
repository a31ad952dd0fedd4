//! Per-file processing results.

use serde::{Deserialize, Serialize};

use super::ImageTask;

/// Outcome of processing a single task, for reporting.
///
/// Not persisted anywhere; the batch driver collects these and hands them
/// to the configured output adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// Path to the source image.
    pub source_path: String,
    /// Path the output was (or would have been) written to.
    pub destination_path: String,
    /// Size of the source file in bytes. Zero when the file could not be
    /// read at all.
    pub original_bytes: u64,
    /// Size of the encoded output in bytes. Zero on failure.
    pub output_bytes: u64,
    /// Whether the task completed and the output was written.
    pub success: bool,
    /// Error description for failed tasks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Timestamp of processing (ISO 8601).
    pub timestamp: String,
}

impl ProcessingResult {
    /// Builds a success result for a written output.
    #[must_use]
    pub fn succeeded(
        task: &ImageTask,
        original_bytes: u64,
        output_bytes: u64,
        timestamp: String,
    ) -> Self {
        Self {
            source_path: task.source_path.to_string_lossy().into_owned(),
            destination_path: task.destination_path.to_string_lossy().into_owned(),
            original_bytes,
            output_bytes,
            success: true,
            error: None,
            timestamp,
        }
    }

    /// Builds a failure result carrying the error description.
    #[must_use]
    pub fn failed(task: &ImageTask, original_bytes: u64, error: String, timestamp: String) -> Self {
        Self {
            source_path: task.source_path.to_string_lossy().into_owned(),
            destination_path: task.destination_path.to_string_lossy().into_owned(),
            original_bytes,
            output_bytes: 0,
            success: false,
            error: Some(error),
            timestamp,
        }
    }

    /// Percentage saved relative to the original: `(1 - output/original) * 100`.
    ///
    /// Negative when the output grew. Zero when the original size is unknown.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_saved(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.output_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}
