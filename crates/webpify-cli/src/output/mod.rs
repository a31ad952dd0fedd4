//! Output formatting for CLI.

mod json;
mod progress;
mod report;

pub use json::JsonOutput;
pub use progress::ProgressBar;
pub use report::TextReport;

use anyhow::Result;
use webpify_core::domain::ProcessingResult;
use webpify_core::ports::ResultOutput;

/// The configured report destination: human-readable text or JSON.
pub enum ReportSink {
    /// Per-file text lines.
    Text(TextReport),
    /// JSON Lines or a single JSON array.
    Json(JsonOutput),
}

impl ReportSink {
    /// Writes a batch of results as a JSON array. Text sinks write each
    /// result as its usual line instead.
    pub fn write_array(&self, results: &[ProcessingResult], pretty: bool) -> Result<()> {
        match self {
            Self::Json(json) => json.write_array(results, pretty),
            Self::Text(text) => {
                for result in results {
                    text.write(result)?;
                }
                Ok(())
            }
        }
    }
}

impl ResultOutput for ReportSink {
    fn write(&self, result: &ProcessingResult) -> Result<()> {
        match self {
            Self::Text(text) => text.write(result),
            Self::Json(json) => json.write(result),
        }
    }

    fn flush(&self) -> Result<()> {
        match self {
            Self::Text(text) => text.flush(),
            Self::Json(json) => json.flush(),
        }
    }
}
