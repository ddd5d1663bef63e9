//! Output formatting for reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing
//! - Shared presentation helpers (byte sizes, dates)

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{SearchHit, WatchListChange};
use crate::orchestrator::{BatchReport, PreviewReport, SnapshotReport};
use crate::presets::PresetCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Whether to use colors (text only)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, no_color: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Self {
            format,
            color: !no_color && !json,
        }
    }
}

/// Outcome of a `config` command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ConfigEvent {
    Show,
    Changed { previous_user_id: Option<String> },
    Reset,
}

/// Current configuration as shown by `config`
#[derive(Debug, Clone, Serialize)]
pub struct ConfigView {
    #[serde(flatten)]
    pub event: ConfigEvent,
    pub user_id: Option<String>,
    pub library_count: usize,
    pub config_dir: PathBuf,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the result of `check`
    fn format_check(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format the result of `preview`
    fn format_preview(&self, report: &PreviewReport, writer: &mut dyn Write)
        -> std::io::Result<()>;

    /// Format search results
    fn format_search(
        &self,
        text: &str,
        hits: &[SearchHit],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format a saved version snapshot
    fn format_snapshot(
        &self,
        report: &SnapshotReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format a user's watch list
    fn format_watch_list(
        &self,
        user_id: &str,
        libraries: &[String],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format the preset catalog, optionally listing each preset's packages
    fn format_presets(
        &self,
        categories: &[PresetCategory],
        show_packages: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format watch-list additions and removals
    fn format_changes(
        &self,
        changes: &[WatchListChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;

    /// Format the outcome of a `config` command
    fn format_config(&self, view: &ConfigView, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::new(config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

/// Render a byte count as kilobytes with one decimal
pub fn format_kb(bytes: u64) -> String {
    format!("{:.1}KB", bytes as f64 / 1024.0)
}

/// Render a timestamp as `YYYY-MM-DD`
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
