//! Configuration file support for webpify.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/webpify/config.toml` (lowest priority)
//! - Project-local: `.webpify.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Optimization parameters.
    pub optimize: OptimizeSection,
    /// Output formatting settings.
    pub output: OutputSection,
}

/// Optimization parameters.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizeSection {
    /// Maximum output width in pixels (positive).
    pub max_width: Option<u32>,
    /// WebP quality (0-100).
    pub quality: Option<u8>,
    /// Animated input handling: "first" or "reject".
    pub animation: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Output format: "text", "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/webpify/config.toml`
    /// 2. Project-local: `.webpify.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(w) = self.optimize.max_width {
            if w == 0 {
                return Err("optimize.max_width must be positive".into());
            }
        }
        if let Some(q) = self.optimize.quality {
            if q > 100 {
                return Err(format!("optimize.quality must be 0-100, got {q}"));
            }
        }
        if let Some(ref a) = self.optimize.animation {
            if a != "first" && a != "reject" {
                return Err(format!(
                    "optimize.animation must be 'first' or 'reject', got '{a}'"
                ));
            }
        }
        if let Some(ref f) = self.output.format {
            if f != "text" && f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'text', 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.optimize.max_width = other.optimize.max_width.or(self.optimize.max_width);
        self.optimize.quality = other.optimize.quality.or(self.optimize.quality);
        self.optimize.animation = other
            .optimize
            .animation
            .or_else(|| self.optimize.animation.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("webpify").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.webpify.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".webpify.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
