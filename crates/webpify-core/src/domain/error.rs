//! Error taxonomy for the optimization pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while processing one task.
///
/// All variants are recovered at the per-task level: the batch reports the
/// failure and moves on to the next file.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum OptimizeError {
    /// Extension is outside the supported set. Discovery filters these out
    /// before a task is created, so the pipeline itself rarely sees it.
    #[error("unsupported format: {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// The codec could not parse the source file.
    #[error("failed to decode {path}")]
    Decode {
        /// The source path.
        path: PathBuf,
        /// Underlying codec error.
        #[source]
        source: image::ImageError,
    },

    /// The source is animated and the policy rejects animated inputs.
    #[error("animated input rejected: {path}")]
    AnimatedInput {
        /// The source path.
        path: PathBuf,
    },

    /// The encoder rejected the parameters or pixel data.
    #[error("webp encoding failed: {reason}")]
    Encode {
        /// Description from the encoder.
        reason: String,
    },

    /// The destination could not be written.
    #[error("failed to write {path}")]
    Write {
        /// The destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
