//! Progress reporting port for UI integration.

use crate::domain::ProcessingResult;

/// Events emitted while the batch runs.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Processing started for an image.
    Started {
        /// Path to the source image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total tasks in the batch, if known.
        total: Option<usize>,
    },
    /// An image was optimized and written.
    Completed {
        /// The processing result.
        result: ProcessingResult,
    },
    /// An image failed; the batch continues.
    Failed {
        /// The failure result.
        result: ProcessingResult,
    },
    /// All tasks have been processed.
    Finished {
        /// Tasks that produced an output file.
        optimized: usize,
        /// Tasks that failed.
        failed: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called for every progress event.
    fn on_event(&self, event: ProgressEvent);
}
