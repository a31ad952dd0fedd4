//! CLI command definitions and handlers.

pub mod optimize;

use clap::Parser;

/// Webpify - Convert images to WebP, resize, and compress
#[derive(Parser)]
#[command(name = "webpify")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optimization arguments (input, width, quality, output).
    #[command(flatten)]
    pub optimize: optimize::OptimizeArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every task succeeded, or there was nothing to do.
    Success,
    /// At least one task failed.
    Failures,
    /// Usage or fatal error.
    Error,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        match code {
            ExitCode::Success => Self::from(0),
            ExitCode::Failures => Self::from(1),
            ExitCode::Error => Self::from(2),
        }
    }
}
