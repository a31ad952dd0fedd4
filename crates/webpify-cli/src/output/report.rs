//! Human-readable per-file report.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Result;
use webpify_core::domain::ProcessingResult;
use webpify_core::ports::ResultOutput;

/// Text report adapter: one line per processed file.
pub struct TextReport {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TextReport {
    /// Creates a text report writing to stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Creates a text report writing to the given writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl ResultOutput for TextReport {
    #[allow(clippy::significant_drop_tightening)]
    fn write(&self, result: &ProcessingResult) -> Result<()> {
        let name = file_name(&result.source_path);
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;

        if result.success {
            writeln!(
                writer,
                "{name}: {} -> {} ({:.1}% saved)",
                format_kib(result.original_bytes),
                format_kib(result.output_bytes),
                result.percent_saved()
            )?;
        } else {
            writeln!(
                writer,
                "{name}: failed: {}",
                result.error.as_deref().unwrap_or("unknown error")
            )?;
        }
        Ok(())
    }

    #[allow(clippy::significant_drop_tightening)]
    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock poisoned: {e}"))?;
        writer.flush()?;
        Ok(())
    }
}

/// File name component of a path string, for compact report lines.
fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned())
}

/// Bytes as kibibytes with one decimal, matching the report format.
#[allow(clippy::cast_precision_loss)]
fn format_kib(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use webpify_core::domain::{AnimationPolicy, ImageTask, OptimizeOptions};

    /// Shared buffer so tests can read back what the report wrote.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn task() -> ImageTask {
        ImageTask::new(
            "photos/cat.png",
            Path::new("out"),
            &OptimizeOptions {
                max_width: 300,
                quality: 85,
                animation: AnimationPolicy::First,
            },
        )
    }

    #[test]
    fn test_success_line() {
        let buf = SharedBuf::default();
        let report = TextReport::new(Box::new(buf.clone()));

        let result = ProcessingResult::succeeded(&task(), 102_400, 25_600, "ts".into());
        report.write(&result).unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "cat.png: 100.0 KB -> 25.0 KB (75.0% saved)\n");
    }

    #[test]
    fn test_failure_line() {
        let buf = SharedBuf::default();
        let report = TextReport::new(Box::new(buf.clone()));

        let result = ProcessingResult::failed(&task(), 1024, "failed to decode".into(), "ts".into());
        report.write(&result).unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(text, "cat.png: failed: failed to decode\n");
    }

    #[test]
    fn test_format_kib() {
        assert_eq!(format_kib(0), "0.0 KB");
        assert_eq!(format_kib(1024), "1.0 KB");
        assert_eq!(format_kib(1536), "1.5 KB");
    }
}
