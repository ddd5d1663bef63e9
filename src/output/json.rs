//! JSON output formatter for machine processing
//!
//! Reports serialize as they are; the other commands get small wrapper
//! objects so that every output is a single JSON object.

use crate::domain::{SearchHit, WatchListChange};
use crate::orchestrator::{BatchReport, PreviewReport, SnapshotReport};
use crate::output::{ConfigView, OutputFormatter};
use crate::presets::PresetCategory;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn write<T: Serialize + ?Sized>(
        &self,
        value: &T,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        writeln!(writer, "{}", json)
    }
}

#[derive(Serialize)]
struct JsonSearch<'a> {
    query: &'a str,
    results: &'a [SearchHit],
}

#[derive(Serialize)]
struct JsonWatchList<'a> {
    user_id: &'a str,
    libraries: &'a [String],
}

#[derive(Serialize)]
struct JsonPresets<'a> {
    categories: &'a [PresetCategory],
}

#[derive(Serialize)]
struct JsonChanges<'a> {
    changes: &'a [WatchListChange],
}

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()> {
        self.write(report, writer)
    }

    fn format_preview(
        &self,
        report: &PreviewReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(report, writer)
    }

    fn format_search(
        &self,
        text: &str,
        hits: &[SearchHit],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(
            &JsonSearch {
                query: text,
                results: hits,
            },
            writer,
        )
    }

    fn format_snapshot(
        &self,
        report: &SnapshotReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(report, writer)
    }

    fn format_watch_list(
        &self,
        user_id: &str,
        libraries: &[String],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(&JsonWatchList { user_id, libraries }, writer)
    }

    // Packages are always included; consumers can ignore them.
    fn format_presets(
        &self,
        categories: &[PresetCategory],
        _show_packages: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(&JsonPresets { categories }, writer)
    }

    fn format_changes(
        &self,
        changes: &[WatchListChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        self.write(&JsonChanges { changes }, writer)
    }

    fn format_config(&self, view: &ConfigView, writer: &mut dyn Write) -> std::io::Result<()> {
        self.write(view, writer)
    }
}
