//! Optimization task types.

use std::path::{Path, PathBuf};

/// Extension given to every output file.
pub const OUTPUT_EXTENSION: &str = "webp";

/// How multi-frame (animated) inputs are handled.
///
/// WebP output produced by this tool is always single-frame, so animated
/// sources cannot be preserved. The policy makes the flattening explicit
/// instead of an implicit side effect of decoding.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationPolicy {
    /// Keep only the first frame. Animation is lost (documented limitation).
    #[default]
    First,
    /// Turn animated inputs into per-file failures.
    Reject,
}

/// Batch-wide optimization parameters.
///
/// There are no hidden defaults here; callers supply every value so the
/// pipeline stays testable with arbitrary combinations.
#[derive(Debug, Clone, Copy)]
pub struct OptimizeOptions {
    /// Upper bound on output width in pixels. Must be positive.
    pub max_width: u32,
    /// WebP quality, 0-100.
    pub quality: u8,
    /// Handling of animated sources.
    pub animation: AnimationPolicy,
}

/// A single unit of work: one input image to optimize.
///
/// Created once per discovered input and immutable afterwards.
#[derive(Debug, Clone)]
pub struct ImageTask {
    /// Path to the source image.
    pub source_path: PathBuf,
    /// Where the encoded WebP will be written. Always
    /// `<output_dir>/<source stem>.webp`; an existing file there is
    /// overwritten without confirmation.
    pub destination_path: PathBuf,
    /// Upper bound on output width in pixels.
    pub max_width: u32,
    /// WebP quality, 0-100.
    pub quality: u8,
}

impl ImageTask {
    /// Creates a task for `source`, deriving the destination from the
    /// source's file stem inside `output_dir`.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, output_dir: &Path, options: &OptimizeOptions) -> Self {
        let source_path = source.into();
        // Append rather than `with_extension`, which would eat a dotted
        // stem like `archive.v2`.
        let mut file_name = source_path.file_stem().unwrap_or_default().to_os_string();
        file_name.push(".");
        file_name.push(OUTPUT_EXTENSION);
        let destination_path = output_dir.join(file_name);

        Self {
            source_path,
            destination_path,
            max_width: options.max_width,
            quality: options.quality,
        }
    }

    /// File name of the source, for report lines.
    #[must_use]
    pub fn source_name(&self) -> String {
        self.source_path
            .file_name()
            .map_or_else(|| self.source_path.display().to_string(), |n| {
                n.to_string_lossy().into_owned()
            })
    }
}
