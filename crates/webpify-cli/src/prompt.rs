//! Interactive width resolution.
//!
//! The width default can come from three places: a flag/config value, an
//! interactive prompt, or the hardcoded default. The prompt is a pluggable
//! strategy so the batch driver never depends on terminal state.

use std::io::{BufRead, IsTerminal, Write};

use tracing::warn;

/// Strategy for asking the user for a max width.
pub trait MaxWidthPrompt {
    /// Returns the user's choice, or `None` to fall back to the default.
    fn ask(&self, default: u32) -> Option<u32>;
}

/// Prompts on the controlling terminal; inert when stdin is not a TTY.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl MaxWidthPrompt for TerminalPrompt {
    fn ask(&self, default: u32) -> Option<u32> {
        if !std::io::stdin().is_terminal() {
            return None;
        }

        eprint!("Max width in pixels (default: {default}): ");
        let _ = std::io::stderr().flush();

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() {
            return None;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.parse::<u32>() {
            Ok(width) if width > 0 => Some(width),
            _ => {
                warn!("Invalid width {trimmed:?}, using default {default}");
                None
            }
        }
    }
}

/// Resolves the effective max width.
///
/// A configured value (flag or config file) wins; otherwise the prompt gets
/// a chance; otherwise `default`.
pub fn resolve_max_width(
    configured: Option<u32>,
    prompt: &dyn MaxWidthPrompt,
    default: u32,
) -> u32 {
    configured.or_else(|| prompt.ask(default)).unwrap_or(default)
}
