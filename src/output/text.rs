//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Per-package blocks (version, update notice, dates, description)
//! - Dependency and bundle size details in detailed mode
//! - Aggregate summaries for the watch list and presets
//! - An errors section for failed lookups

use crate::domain::{ChangeKind, PresetAggregate, SearchHit, WatchListChange};
use crate::orchestrator::{BatchReport, LookupError, PackageReport, PreviewReport, SnapshotReport};
use crate::output::{format_date, format_kb, ConfigEvent, ConfigView, OutputFormatter};
use crate::presets::PresetCategory;
use crate::registry::MIN_SEARCH_LENGTH;
use crate::update::UpdateStatus;
use colored::{ColoredString, Colorize};
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn arrow(&self) -> &'static str {
        if self.color {
            "→"
        } else {
            "->"
        }
    }

    /// Write one package block; packages without a record are left to the errors section
    fn write_package(
        &self,
        package: &PackageReport,
        show_membership: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let Some(record) = &package.record else {
            return Ok(());
        };

        let header = self.paint(&format!("{}:", record.name), |s| s.green().bold());
        if show_membership && package.in_watch_list {
            writeln!(
                writer,
                "{} {}",
                header,
                self.paint("(in watch list)", |s| s.dimmed())
            )?;
        } else {
            writeln!(writer, "{}", header)?;
        }

        writeln!(writer, "  Current version: {}", record.current_version)?;

        match &package.status {
            Some(UpdateStatus::Classified { saved, update_type }) if update_type.is_update() => {
                let line = format!(
                    "  Update available: {} {} {} ({})",
                    saved,
                    self.arrow(),
                    record.current_version,
                    update_type
                );
                writeln!(writer, "{}", self.paint(&line, |s| s.yellow()))?;
            }
            Some(UpdateStatus::Malformed { saved, reason }) => {
                let line = format!(
                    "  Could not compare with saved version {}: {}",
                    saved, reason
                );
                writeln!(writer, "{}", self.paint(&line, |s| s.red()))?;
            }
            _ => {}
        }

        writeln!(writer, "  Last updated: {}", format_date(record.last_update))?;
        writeln!(writer, "  Description: {}", record.description_or_default())?;

        if let Some(analysis) = &package.analysis {
            match analysis.bundle_size {
                Some(bundle) => writeln!(
                    writer,
                    "  Bundle size: {} ({} gzipped)",
                    format_kb(bundle.size),
                    format_kb(bundle.gzip)
                )?,
                None => writeln!(
                    writer,
                    "  Bundle size: {}",
                    self.paint("unavailable", |s| s.yellow())
                )?,
            }
            writeln!(writer, "  Dependencies: {}", analysis.dependencies.len())?;
            writeln!(
                writer,
                "  Peer Dependencies: {}",
                analysis.peer_dependencies.len()
            )?;
            if !analysis.dev_dependencies.is_empty() {
                writeln!(
                    writer,
                    "  Dev Dependencies: {}",
                    analysis.dev_dependencies.len()
                )?;
            }
        }

        if let Some(homepage) = &record.homepage {
            writeln!(writer, "  Homepage: {}", homepage)?;
        }
        writeln!(writer)
    }

    fn write_aggregate(
        &self,
        aggregate: &PresetAggregate,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(
            writer,
            "Total unique dependencies: {}",
            aggregate.dependency_count()
        )?;
        writeln!(
            writer,
            "Total unique peer dependencies: {}",
            aggregate.peer_dependency_count()
        )?;
        let totals = format!(
            "Total bundle size: {} ({} gzipped",
            format_kb(aggregate.total_bundle_bytes),
            format_kb(aggregate.total_gzip_bytes)
        );
        if aggregate.has_unsized() {
            writeln!(
                writer,
                "{}; {} of {} packages sized)",
                totals, aggregate.sized_count, aggregate.resolved_count
            )
        } else {
            writeln!(writer, "{})", totals)
        }
    }

    fn write_package_total(
        &self,
        total: usize,
        aggregate: Option<&PresetAggregate>,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        match aggregate {
            Some(agg) if agg.missing_count() > 0 => writeln!(
                writer,
                "Total packages: {} ({} resolved)",
                total, agg.resolved_count
            ),
            _ => writeln!(writer, "Total packages: {}", total),
        }
    }

    fn write_errors(&self, errors: &[LookupError], writer: &mut dyn Write) -> std::io::Result<()> {
        if errors.is_empty() {
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(writer, "{}", self.paint("Errors:", |s| s.red().bold()))?;
        for error in errors {
            writeln!(
                writer,
                "  {}: {}",
                self.paint(&error.package, |s| s.red()),
                error.message
            )?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format_check(&self, report: &BatchReport, writer: &mut dyn Write) -> std::io::Result<()> {
        if report.packages.is_empty() {
            let message =
                "No libraries in your watch list. Add one with: lib-check add <PACKAGE>";
            return writeln!(writer, "{}", self.paint(message, |s| s.yellow()));
        }

        for package in &report.packages {
            self.write_package(package, false, writer)?;
        }

        if let Some(aggregate) = &report.aggregate {
            writeln!(writer, "{}", self.paint("Watch List Summary:", |s| s.blue()))?;
            self.write_package_total(report.packages.len(), Some(aggregate), writer)?;
            self.write_aggregate(aggregate, writer)?;
        }

        self.write_errors(&report.errors, writer)
    }

    fn format_preview(
        &self,
        report: &PreviewReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let title = format!(
            "Previewing {} ({}/{}):",
            report.name, report.category, report.preset
        );
        writeln!(writer, "{}", self.paint(&title, |s| s.blue()))?;
        writeln!(writer)?;

        let batch = &report.batch;
        for package in &batch.packages {
            self.write_package(package, true, writer)?;
        }

        writeln!(writer, "{}", self.paint("Preset Summary:", |s| s.blue()))?;
        self.write_package_total(batch.packages.len(), batch.aggregate.as_ref(), writer)?;
        let watched = batch.packages.iter().filter(|p| p.in_watch_list).count();
        writeln!(writer, "Already in watch list: {}", watched)?;
        if let Some(aggregate) = &batch.aggregate {
            self.write_aggregate(aggregate, writer)?;
        }

        if !report.changes.is_empty() {
            writeln!(writer)?;
            self.format_changes(&report.changes, writer)?;
        }

        self.write_errors(&batch.errors, writer)
    }

    fn format_search(
        &self,
        text: &str,
        hits: &[SearchHit],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if text.chars().count() < MIN_SEARCH_LENGTH {
            let message = format!(
                "Search text must be at least {} characters",
                MIN_SEARCH_LENGTH
            );
            return writeln!(writer, "{}", self.paint(&message, |s| s.yellow()));
        }

        if hits.is_empty() {
            let message = format!("No packages found for '{}'", text);
            return writeln!(writer, "{}", self.paint(&message, |s| s.yellow()));
        }

        for hit in hits {
            writeln!(
                writer,
                "  {} - {}",
                self.paint(&hit.name, |s| s.green()),
                self.paint(&hit.description, |s| s.dimmed())
            )?;
        }
        Ok(())
    }

    fn format_snapshot(
        &self,
        report: &SnapshotReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let title = format!("Saved versions for {} packages:", report.versions.len());
        writeln!(writer, "{}", self.paint(&title, |s| s.green()))?;
        for (name, version) in &report.versions {
            writeln!(writer, "  {}: {}", name, version)?;
        }
        self.write_errors(&report.errors, writer)
    }

    fn format_watch_list(
        &self,
        user_id: &str,
        libraries: &[String],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        if libraries.is_empty() {
            let message = "No libraries in your watch list.";
            return writeln!(writer, "{}", self.paint(message, |s| s.yellow()));
        }

        let title = format!("Watch list for {} ({}):", user_id, libraries.len());
        writeln!(writer, "{}", self.paint(&title, |s| s.blue()))?;
        for library in libraries {
            writeln!(writer, "  - {}", library)?;
        }
        Ok(())
    }

    fn format_presets(
        &self,
        categories: &[PresetCategory],
        show_packages: bool,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for category in categories {
            let title = format!("{}:", category.key);
            writeln!(writer, "{}", self.paint(&title, |s| s.blue().bold()))?;
            for preset in category.presets {
                writeln!(
                    writer,
                    "  {} - {} ({} packages)",
                    self.paint(preset.key, |s| s.green()),
                    preset.name,
                    preset.packages.len()
                )?;
                if show_packages {
                    writeln!(
                        writer,
                        "    {}",
                        self.paint(&preset.packages.join(", "), |s| s.dimmed())
                    )?;
                }
            }
        }
        Ok(())
    }

    fn format_changes(
        &self,
        changes: &[WatchListChange],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for change in changes {
            let line = match change.kind {
                ChangeKind::Added => {
                    self.paint(&format!("Added {} to your watch list", change.package), |s| {
                        s.green()
                    })
                }
                ChangeKind::AlreadyPresent => self.paint(
                    &format!("{} is already in your watch list", change.package),
                    |s| s.yellow(),
                ),
                ChangeKind::Removed => self.paint(
                    &format!("Removed {} from your watch list", change.package),
                    |s| s.green(),
                ),
                ChangeKind::NotPresent => self.paint(
                    &format!("{} is not in your watch list", change.package),
                    |s| s.yellow(),
                ),
            };
            writeln!(writer, "{}", line)?;
        }
        Ok(())
    }

    fn format_config(&self, view: &ConfigView, writer: &mut dyn Write) -> std::io::Result<()> {
        let user = view.user_id.as_deref().unwrap_or("(not set)");
        match &view.event {
            ConfigEvent::Show => {
                writeln!(writer, "User ID: {}", user)?;
                writeln!(writer, "Libraries watched: {}", view.library_count)?;
                writeln!(writer, "Config directory: {}", view.config_dir.display())
            }
            ConfigEvent::Changed {
                previous_user_id: Some(previous),
            } => {
                let line = format!("User ID changed from {} to {}", previous, user);
                writeln!(writer, "{}", self.paint(&line, |s| s.green()))
            }
            ConfigEvent::Changed {
                previous_user_id: None,
            } => {
                let line = format!("User ID set to {}", user);
                writeln!(writer, "{}", self.paint(&line, |s| s.green()))
            }
            ConfigEvent::Reset => {
                writeln!(writer, "{}", self.paint("Configuration reset", |s| s.green()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{aggregate, DependencyAnalysis, PackageRecord, UpdateType};
    use crate::presets::CATEGORIES;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn render(f: impl FnOnce(&TextFormatter, &mut Vec<u8>) -> std::io::Result<()>) -> String {
        let formatter = TextFormatter::new(false);
        let mut output = Vec::new();
        f(&formatter, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn package(name: &str, version: &str) -> PackageReport {
        PackageReport {
            name: name.to_string(),
            record: Some(
                PackageRecord::new(name, version)
                    .with_last_update(Utc.with_ymd_and_hms(2024, 4, 25, 10, 0, 0).unwrap())
                    .with_description("A test package"),
            ),
            status: None,
            analysis: None,
            in_watch_list: true,
        }
    }

    fn failed(name: &str) -> (PackageReport, LookupError) {
        (
            PackageReport {
                name: name.to_string(),
                record: None,
                status: None,
                analysis: None,
                in_watch_list: false,
            },
            LookupError {
                package: name.to_string(),
                message: "package not found".to_string(),
            },
        )
    }

    #[test]
    fn test_check_shows_update_notice() {
        let mut react = package("react", "19.0.0");
        react.status = Some(UpdateStatus::Classified {
            saved: "18.3.1".to_string(),
            update_type: UpdateType::Major,
        });
        let mut vue = package("vue", "3.4.27");
        vue.status = Some(UpdateStatus::Classified {
            saved: "3.4.27".to_string(),
            update_type: UpdateType::None,
        });
        let report = BatchReport {
            packages: vec![react, vue],
            aggregate: None,
            errors: Vec::new(),
        };

        let output = render(|f, w| f.format_check(&report, w));

        assert!(output.contains("react:"));
        assert!(output.contains("  Current version: 19.0.0"));
        assert!(output.contains("  Update available: 18.3.1 -> 19.0.0 (MAJOR)"));
        assert!(output.contains("  Last updated: 2024-04-25"));
        assert!(output.contains("  Description: A test package"));
        assert_eq!(output.matches("Update available").count(), 1);
        assert!(!output.contains("Errors:"));
    }

    #[test]
    fn test_check_malformed_note() {
        let mut react = package("react", "19.0.0");
        react.status = Some(UpdateStatus::Malformed {
            saved: "18.3".to_string(),
            reason: "expected 3 components".to_string(),
        });
        let report = BatchReport {
            packages: vec![react],
            aggregate: None,
            errors: Vec::new(),
        };

        let output = render(|f, w| f.format_check(&report, w));
        assert!(output.contains("Could not compare with saved version 18.3"));
        assert!(output.contains("  Current version: 19.0.0"));
    }

    #[test]
    fn test_check_empty_watch_list() {
        let report = BatchReport {
            packages: Vec::new(),
            aggregate: None,
            errors: Vec::new(),
        };
        let output = render(|f, w| f.format_check(&report, w));
        assert!(output.contains("No libraries in your watch list"));
    }

    #[test]
    fn test_check_detailed_summary_and_errors() {
        let mut a = package("pkg-a", "1.0.0");
        a.analysis = Some(
            DependencyAnalysis::new()
                .with_dependency("x", "^1.0.0")
                .with_dependency("y", "^1.0.0")
                .with_bundle_size(1000, 400),
        );
        let mut b = package("pkg-b", "2.0.0");
        b.analysis = Some(
            DependencyAnalysis::new()
                .with_dependency("y", "^1.0.0")
                .with_dependency("z", "^1.0.0")
                .with_dev_dependency("jest", "^29.0.0")
                .with_bundle_size(2000, 800),
        );
        let (c, error) = failed("pkg-c");
        let packages = vec![a, b, c];
        let summary = aggregate(packages.iter().map(|p| (&p.name, p.analysis.as_ref())));
        let report = BatchReport {
            packages,
            aggregate: Some(summary),
            errors: vec![error],
        };

        let output = render(|f, w| f.format_check(&report, w));

        assert!(output.contains("  Bundle size: 1.0KB (0.4KB gzipped)"));
        assert!(output.contains("  Bundle size: 2.0KB (0.8KB gzipped)"));
        assert!(output.contains("  Dev Dependencies: 1"));
        assert!(output.contains("Watch List Summary:"));
        assert!(output.contains("Total packages: 3 (2 resolved)"));
        assert!(output.contains("Total unique dependencies: 3"));
        assert!(output.contains("Total unique peer dependencies: 0"));
        assert!(output.contains("Total bundle size: 2.9KB (1.2KB gzipped)"));
        assert!(output.contains("Errors:"));
        assert!(output.contains("  pkg-c: package not found"));
        assert!(!output.contains("pkg-c:\n  Current version"));
    }

    #[test]
    fn test_check_flags_missing_bundle_size() {
        let mut sized = package("pkg-a", "1.0.0");
        sized.analysis = Some(DependencyAnalysis::new().with_bundle_size(1024, 410));
        let mut unsized_pkg = package("pkg-b", "2.0.0");
        unsized_pkg.analysis = Some(DependencyAnalysis::new().with_dependency("x", "^1.0.0"));
        let packages = vec![sized, unsized_pkg];
        let summary = aggregate(packages.iter().map(|p| (&p.name, p.analysis.as_ref())));
        let report = BatchReport {
            packages,
            aggregate: Some(summary),
            errors: Vec::new(),
        };

        let output = render(|f, w| f.format_check(&report, w));

        assert!(output.contains("pkg-b:\n  Current version: 2.0.0"));
        assert!(output.contains("  Bundle size: unavailable"));
        assert!(output
            .contains("Total bundle size: 1.0KB (0.4KB gzipped; 1 of 2 packages sized)"));
    }

    #[test]
    fn test_preview_marks_membership() {
        let watched = package("pinia", "2.1.7");
        let mut other = package("vuex", "4.1.0");
        other.in_watch_list = false;
        let report = PreviewReport {
            category: "state".to_string(),
            preset: "vue-state".to_string(),
            name: "Vue State Management".to_string(),
            batch: BatchReport {
                packages: vec![watched, other],
                aggregate: None,
                errors: Vec::new(),
            },
            changes: vec![WatchListChange::new("vuex", ChangeKind::Added)],
        };

        let output = render(|f, w| f.format_preview(&report, w));

        assert!(output.starts_with("Previewing Vue State Management (state/vue-state):"));
        assert!(output.contains("pinia: (in watch list)"));
        assert!(output.contains("vuex:\n"));
        assert!(output.contains("Preset Summary:"));
        assert!(output.contains("Total packages: 2\n"));
        assert!(output.contains("Already in watch list: 1"));
        assert!(!output.contains("Total unique dependencies"));
        assert!(output.contains("Added vuex to your watch list"));
    }

    #[test]
    fn test_search_results() {
        let hits = vec![
            SearchHit::new("react", Some("UI library".to_string())),
            SearchHit::new("react-dom", None),
        ];
        let output = render(|f, w| f.format_search("react", &hits, w));
        assert!(output.contains("  react - UI library"));
        assert!(output.contains("  react-dom - No description available"));

        let output = render(|f, w| f.format_search("re", &[], w));
        assert!(output.contains("at least 3 characters"));

        let output = render(|f, w| f.format_search("zzzzqqq", &[], w));
        assert!(output.contains("No packages found for 'zzzzqqq'"));
    }

    #[test]
    fn test_snapshot() {
        let mut report = SnapshotReport::default();
        report
            .versions
            .insert("react".to_string(), "19.0.0".to_string());
        let output = render(|f, w| f.format_snapshot(&report, w));
        assert!(output.contains("Saved versions for 1 packages:"));
        assert!(output.contains("  react: 19.0.0"));
    }

    #[test]
    fn test_watch_list() {
        let libraries = vec!["react".to_string(), "vue".to_string()];
        let output = render(|f, w| f.format_watch_list("alice", &libraries, w));
        assert!(output.contains("Watch list for alice (2):"));
        assert!(output.contains("  - react\n  - vue"));

        let output = render(|f, w| f.format_watch_list("alice", &[], w));
        assert!(output.contains("No libraries in your watch list."));
    }

    #[test]
    fn test_presets() {
        let output = render(|f, w| f.format_presets(CATEGORIES, false, w));
        assert!(output.contains("frontend:"));
        assert!(output.contains("  react-stack - React Frontend Stack (9 packages)"));
        assert!(!output.contains("react-dom"));

        let output = render(|f, w| f.format_presets(&CATEGORIES[4..], true, w));
        assert!(!output.contains("frontend:"));
        assert!(output.contains("    pinia, vuex, vuex-persist, vue-rx"));
    }

    #[test]
    fn test_changes() {
        let changes = vec![
            WatchListChange::new("react", ChangeKind::Added),
            WatchListChange::new("vue", ChangeKind::AlreadyPresent),
            WatchListChange::new("axios", ChangeKind::Removed),
            WatchListChange::new("lodash", ChangeKind::NotPresent),
        ];
        let output = render(|f, w| f.format_changes(&changes, w));
        assert!(output.contains("Added react to your watch list"));
        assert!(output.contains("vue is already in your watch list"));
        assert!(output.contains("Removed axios from your watch list"));
        assert!(output.contains("lodash is not in your watch list"));
    }

    #[test]
    fn test_config_views() {
        let mut view = ConfigView {
            event: ConfigEvent::Show,
            user_id: None,
            library_count: 0,
            config_dir: PathBuf::from("/cfg/lib-check"),
        };
        let output = render(|f, w| f.format_config(&view, w));
        assert!(output.contains("User ID: (not set)"));
        assert!(output.contains("Config directory: /cfg/lib-check"));

        view.event = ConfigEvent::Changed {
            previous_user_id: Some("alice".to_string()),
        };
        view.user_id = Some("bob".to_string());
        let output = render(|f, w| f.format_config(&view, w));
        assert_eq!(output, "User ID changed from alice to bob\n");

        view.event = ConfigEvent::Changed {
            previous_user_id: None,
        };
        let output = render(|f, w| f.format_config(&view, w));
        assert_eq!(output, "User ID set to bob\n");
    }
}
