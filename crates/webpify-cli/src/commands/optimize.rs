//! Optimize command - convert images to WebP, resize, and compress.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::{debug, info, warn};
use webpify_adapters::{ensure_dir, load_source, write_output, FsTaskSource};
use webpify_core::{
    AnimationPolicy, ImageTask, OptimizeError, OptimizeOptions, Optimizer, ProcessingResult,
    ProgressEvent, ProgressSink, ResultOutput, TaskSource,
};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar, ReportSink, TextReport};
use crate::prompt::{resolve_max_width, MaxWidthPrompt, TerminalPrompt};

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable per-file report
    #[default]
    Text,
    /// JSON Lines (one JSON object per line)
    Jsonl,
    /// Single JSON array
    Json,
}

/// Animated input handling.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum AnimationArg {
    /// Keep only the first frame (animation is lost)
    First,
    /// Fail animated inputs
    Reject,
}

impl From<AnimationArg> for AnimationPolicy {
    fn from(arg: AnimationArg) -> Self {
        match arg {
            AnimationArg::First => Self::First,
            AnimationArg::Reject => Self::Reject,
        }
    }
}

/// Hardcoded default values.
mod defaults {
    pub const MAX_WIDTH: u32 = 300;
    pub const QUALITY: u8 = 85;
}

/// Parse and validate a positive pixel width.
fn parse_width(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value == 0 {
        Err("width must be positive".into())
    } else {
        Ok(value)
    }
}

/// Parse and validate a quality value (0-100).
fn parse_quality(s: &str) -> Result<u8, String> {
    let value: u8 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value > 100 {
        Err(format!("{value} is not in 0..=100"))
    } else {
        Ok(value)
    }
}

/// Arguments for image optimization.
#[derive(Args, Clone)]
pub struct OptimizeArgs {
    /// File or directory to optimize
    pub input: Option<PathBuf>,

    /// Output directory (default: alongside the input, created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Max output width in pixels (prompts when omitted on a terminal)
    #[arg(short = 'w', long, value_parser = parse_width)]
    pub width: Option<u32>,

    /// WebP quality 0-100
    #[arg(short = 'q', long, value_parser = parse_quality)]
    pub quality: Option<u8>,

    /// Animated input handling
    #[arg(long, value_enum)]
    pub animation: Option<AnimationArg>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output (only affects --format json)
    #[arg(long)]
    pub pretty: bool,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl OptimizeArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in accessor methods)
    /// 2. Config file values (XDG, then project-local)
    /// 3. CLI arguments (already set on self)
    #[must_use]
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        // Out-of-range config values were already warned about in
        // `AppConfig::load`; ignore them here instead of failing every task.
        args.width = args.width.or(config.optimize.max_width.filter(|w| *w > 0));
        args.quality = args.quality.or(config.optimize.quality.filter(|q| *q <= 100));

        if args.animation.is_none() {
            args.animation = config
                .optimize
                .animation
                .as_ref()
                .and_then(|s| match s.as_str() {
                    "first" => Some(AnimationArg::First),
                    "reject" => Some(AnimationArg::Reject),
                    _ => None,
                });
        }

        if args.format.is_none() {
            args.format = config.output.format.as_ref().and_then(|s| match s.as_str() {
                "text" => Some(OutputFormat::Text),
                "json" => Some(OutputFormat::Json),
                "jsonl" => Some(OutputFormat::Jsonl),
                _ => None,
            });
        }

        // Boolean output options: CLI flag wins, then config
        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Get quality with fallback to the hardcoded default.
    fn quality(&self) -> u8 {
        self.quality.unwrap_or(defaults::QUALITY)
    }

    /// Get output format with fallback to text.
    fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    /// Get animation policy with fallback to first-frame flattening.
    fn animation_policy(&self) -> AnimationPolicy {
        self.animation.map_or_else(AnimationPolicy::default, Into::into)
    }
}

/// Result of running the optimize command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct OptimizeSummary {
    /// Tasks that produced an output file.
    pub optimized: usize,
    /// Tasks that failed.
    pub failed: usize,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the optimize command.
///
/// Expects `args` to have been processed through `with_config()` first to
/// apply configuration file settings.
pub fn run(args: &OptimizeArgs) -> Result<OptimizeSummary> {
    run_with_prompt(args, &TerminalPrompt)
}

/// Run with an explicit width-prompt strategy.
pub fn run_with_prompt(args: &OptimizeArgs, prompt: &dyn MaxWidthPrompt) -> Result<OptimizeSummary> {
    let Some(input) = args.input.as_ref() else {
        anyhow::bail!("no input path specified");
    };

    let options = OptimizeOptions {
        max_width: resolve_max_width(args.width, prompt, defaults::MAX_WIDTH),
        quality: args.quality(),
        animation: args.animation_policy(),
    };
    info!(
        "Optimizing {} (max width {}px, quality {})",
        input.display(),
        options.max_width,
        options.quality
    );

    let source = FsTaskSource::new(input.clone(), args.output.clone(), options);

    // Determine if we should show a progress bar
    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let total = source.count_hint();
    #[allow(clippy::cast_possible_truncation)]
    let progress = ProgressBar::new(total.map(|t| t as u64), args.quiet, show_progress);

    let output = match args.format() {
        OutputFormat::Text => ReportSink::Text(TextReport::stdout()),
        OutputFormat::Jsonl | OutputFormat::Json => ReportSink::Json(JsonOutput::stdout()),
    };

    let optimizer = Optimizer::new(options);

    process_tasks(&source, &optimizer, &output, &progress, args)
}

/// Process every discovered task, one after another, in discovery order.
fn process_tasks(
    source: &FsTaskSource,
    optimizer: &Optimizer,
    output: &ReportSink,
    progress: &ProgressBar,
    args: &OptimizeArgs,
) -> Result<OptimizeSummary> {
    let total = source.count_hint();
    let tasks: Vec<ImageTask> = source.tasks().collect();

    if tasks.is_empty() {
        warn!("No supported images found");
        progress.on_event(ProgressEvent::Finished {
            optimized: 0,
            failed: 0,
        });
        return Ok(OptimizeSummary {
            optimized: 0,
            failed: 0,
            exit_code: ExitCode::Success,
        });
    }
    debug!("Processing {} tasks", tasks.len());

    let output_dir = source.output_dir().to_path_buf();
    let mut dir_ready = false;

    let mut optimized = 0usize;
    let mut failed = 0usize;
    let mut all_results: Vec<ProcessingResult> = Vec::new();

    for (index, task) in tasks.iter().enumerate() {
        progress.on_event(ProgressEvent::Started {
            path: task.source_path.display().to_string(),
            index,
            total,
        });

        let result = process_task(optimizer, task, &output_dir, &mut dir_ready);

        if result.success {
            optimized += 1;
            progress.on_event(ProgressEvent::Completed {
                result: result.clone(),
            });
        } else {
            failed += 1;
            progress.on_event(ProgressEvent::Failed {
                result: result.clone(),
            });
        }

        // Output based on format
        match args.format() {
            OutputFormat::Text | OutputFormat::Jsonl => output.write(&result)?,
            OutputFormat::Json => all_results.push(result),
        }
    }

    // For JSON format, output all results as one array
    if matches!(args.format(), OutputFormat::Json) {
        output.write_array(&all_results, args.pretty)?;
    }

    output.flush()?;

    progress.on_event(ProgressEvent::Finished { optimized, failed });

    let exit_code = if failed > 0 {
        ExitCode::Failures
    } else {
        ExitCode::Success
    };

    Ok(OptimizeSummary {
        optimized,
        failed,
        exit_code,
    })
}

/// Run one task through decode → optimize → write, catching every error
/// into a failure result so the batch continues.
fn process_task(
    optimizer: &Optimizer,
    task: &ImageTask,
    output_dir: &Path,
    dir_ready: &mut bool,
) -> ProcessingResult {
    match run_pipeline(optimizer, task, output_dir, dir_ready) {
        Ok((original_bytes, output_bytes)) => {
            ProcessingResult::succeeded(task, original_bytes, output_bytes, iso_timestamp())
        }
        Err((original_bytes, err)) => {
            warn!("Failed to optimize {}: {err}", task.source_path.display());
            let reason = format!("{:#}", anyhow::Error::new(err));
            ProcessingResult::failed(task, original_bytes, reason, iso_timestamp())
        }
    }
}

/// The per-file pipeline. Errors carry the original byte size measured so
/// far, so failure results can still report it.
fn run_pipeline(
    optimizer: &Optimizer,
    task: &ImageTask,
    output_dir: &Path,
    dir_ready: &mut bool,
) -> Result<(u64, u64), (u64, OptimizeError)> {
    let animation = optimizer.options().animation;
    let (image, original_bytes) =
        load_source(&task.source_path, animation).map_err(|e| (0, e))?;

    let encoded = optimizer.optimize(image).map_err(|e| (original_bytes, e))?;
    debug!(
        "{}: {}x{}{}",
        task.source_path.display(),
        encoded.width,
        encoded.height,
        if encoded.resized { " (resized)" } else { "" }
    );

    // Output directory is created once, lazily, before the first write.
    if !*dir_ready {
        ensure_dir(output_dir).map_err(|e| (original_bytes, e))?;
        *dir_ready = true;
    }

    write_output(&task.destination_path, &encoded.bytes).map_err(|e| (original_bytes, e))?;

    Ok((original_bytes, encoded.bytes.len() as u64))
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
