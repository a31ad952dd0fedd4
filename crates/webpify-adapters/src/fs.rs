//! Filesystem adapter: input discovery, source loading, output writing.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage};
use tracing::{debug, warn};
use webpify_core::domain::{AnimationPolicy, ImageTask, OptimizeError, OptimizeOptions};
use webpify_core::ports::TaskSource;

/// Extensions accepted as input.
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

/// Filesystem task source.
///
/// The input is either a single file or a directory; directory scans are
/// non-recursive and keep the filesystem's enumeration order.
pub struct FsTaskSource {
    input: PathBuf,
    output_dir: PathBuf,
    options: OptimizeOptions,
}

impl FsTaskSource {
    /// Creates a new source.
    ///
    /// When `output_dir` is `None` the output goes next to the input: the
    /// input's parent for a file, the directory itself for a directory.
    #[must_use]
    pub fn new(input: PathBuf, output_dir: Option<PathBuf>, options: OptimizeOptions) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| {
            if input.is_file() {
                input.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
            } else {
                input.clone()
            }
        });

        Self {
            input,
            output_dir,
            options,
        }
    }

    /// The resolved output directory. Created lazily before the first write,
    /// not here.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Collects the input files worth processing.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        if self.input.is_file() {
            if is_supported(&self.input) {
                files.push(self.input.clone());
            } else {
                warn!("Unsupported file type: {}", self.input.display());
            }
        } else if self.input.is_dir() {
            self.collect_from_dir(&mut files);
        } else {
            warn!("Path does not exist: {}", self.input.display());
        }

        files
    }

    fn collect_from_dir(&self, files: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(&self.input) {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory {}: {e}", self.input.display());
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_supported(&path) {
                files.push(path);
            }
        }
    }
}

impl TaskSource for FsTaskSource {
    fn tasks(&self) -> Box<dyn Iterator<Item = ImageTask> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} input files", files.len());

        let output_dir = self.output_dir.clone();
        let options = self.options;
        Box::new(
            files
                .into_iter()
                .map(move |path| ImageTask::new(path, &output_dir, &options)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

/// Loads a source image and its on-disk byte size.
///
/// GIF inputs honor the animation policy; every other format decodes through
/// the standard one-frame path.
///
/// # Errors
///
/// Returns [`OptimizeError::Decode`] when the file cannot be read or parsed,
/// and [`OptimizeError::AnimatedInput`] when the policy rejects a
/// multi-frame source.
pub fn load_source(
    path: &Path,
    animation: AnimationPolicy,
) -> Result<(DynamicImage, u64), OptimizeError> {
    let original_bytes = std::fs::metadata(path)
        .map_err(|e| decode_io_error(path, e))?
        .len();

    let is_gif = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"));

    let image = if is_gif {
        load_gif(path, animation)?
    } else {
        image::open(path).map_err(|source| OptimizeError::Decode {
            path: path.to_path_buf(),
            source,
        })?
    };

    Ok((image, original_bytes))
}

/// Decodes a GIF's first frame, applying the animation policy.
fn load_gif(path: &Path, animation: AnimationPolicy) -> Result<DynamicImage, OptimizeError> {
    let file = File::open(path).map_err(|e| decode_io_error(path, e))?;
    let decoder = GifDecoder::new(BufReader::new(file)).map_err(|source| OptimizeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let mut frames = decoder.into_frames();
    let first = frames
        .next()
        .ok_or_else(|| decode_io_error(path, std::io::Error::other("gif contains no frames")))?
        .map_err(|source| OptimizeError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    if animation == AnimationPolicy::Reject && frames.next().is_some() {
        return Err(OptimizeError::AnimatedInput {
            path: path.to_path_buf(),
        });
    }

    Ok(DynamicImage::ImageRgba8(first.into_buffer()))
}

fn decode_io_error(path: &Path, error: std::io::Error) -> OptimizeError {
    OptimizeError::Decode {
        path: path.to_path_buf(),
        source: image::ImageError::IoError(error),
    }
}

/// Creates the output directory. Idempotent.
///
/// # Errors
///
/// Returns [`OptimizeError::Write`] when creation fails.
pub fn ensure_dir(dir: &Path) -> Result<(), OptimizeError> {
    std::fs::create_dir_all(dir).map_err(|source| OptimizeError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

/// Writes encoded bytes to the destination, overwriting any existing file.
///
/// # Errors
///
/// Returns [`OptimizeError::Write`] when the destination is not writable.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), OptimizeError> {
    std::fs::write(path, bytes).map_err(|source| OptimizeError::Write {
        path: path.to_path_buf(),
        source,
    })
}
