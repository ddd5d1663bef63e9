//! Orchestrator for batched package lookups
//!
//! This module provides:
//! - Concurrent fan-out of per-package lookups bounded by a semaphore
//! - Update detection against a saved version snapshot
//! - Dependency analysis and aggregation for detailed reports
//! - Partial continuation: a failed lookup becomes an absent record plus an error entry

use crate::domain::{
    aggregate, DependencyAnalysis, PackageRecord, PresetAggregate, SearchHit, WatchListChange,
};
use crate::error::RegistryError;
use crate::presets::Preset;
use crate::progress::Progress;
use crate::registry::{
    BundlephobiaAdapter, DependencyAnalyzer, DependencySource, HttpClient, NpmAdapter,
    PackageSource,
};
use crate::settings::Settings;
use crate::update::{check_update, UpdateStatus};
use futures::future::join_all;
use indicatif::ProgressBar;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// A per-package failure collected during a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LookupError {
    pub package: String,
    pub message: String,
}

impl LookupError {
    fn new(package: &str, message: impl Into<String>) -> Self {
        Self {
            package: package.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.package, self.message)
    }
}

/// Result of looking up one package
#[derive(Debug, Clone, Serialize)]
pub struct PackageReport {
    pub name: String,
    /// Absent when the lookup failed
    pub record: Option<PackageRecord>,
    /// Comparison with the saved snapshot (check only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UpdateStatus>,
    /// Dependency analysis (detailed mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<DependencyAnalysis>,
    pub in_watch_list: bool,
}

/// Packages of one batch in request order, with optional aggregate
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub packages: Vec<PackageReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<PresetAggregate>,
    pub errors: Vec<LookupError>,
}

impl BatchReport {
    /// True when some lookups failed or a saved version could not be compared
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
            || self
                .packages
                .iter()
                .any(|p| p.status.as_ref().is_some_and(UpdateStatus::is_malformed))
    }
}

/// Preview of a preset
#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub category: String,
    pub preset: String,
    pub name: String,
    #[serde(flatten)]
    pub batch: BatchReport,
    /// Watch-list changes when the preset was added
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<WatchListChange>,
}

/// Latest versions of a watch list
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotReport {
    pub versions: BTreeMap<String, String>,
    pub errors: Vec<LookupError>,
}

impl SnapshotReport {
    /// Fresh versions, keeping the previous entry for packages whose lookup failed
    pub fn merged_with(&self, previous: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut versions = self.versions.clone();
        for error in &self.errors {
            if let Some(old) = previous.get(&error.package) {
                versions
                    .entry(error.package.clone())
                    .or_insert_with(|| old.clone());
            }
        }
        versions
    }
}

/// Outcome of one lookup before it is placed into a report
struct Lookup {
    record: Option<PackageRecord>,
    analysis: Option<DependencyAnalysis>,
    errors: Vec<LookupError>,
}

/// Orchestrator for registry lookups
pub struct Orchestrator {
    packages: Arc<dyn PackageSource>,
    analyses: Arc<dyn DependencySource>,
    /// Bounds the number of in-flight lookups
    semaphore: Arc<Semaphore>,
    show_progress: bool,
}

impl Orchestrator {
    /// Create an orchestrator over the given sources
    pub fn new(
        packages: Arc<dyn PackageSource>,
        analyses: Arc<dyn DependencySource>,
        concurrency: usize,
    ) -> Self {
        Self {
            packages,
            analyses,
            semaphore: Arc::new(Semaphore::new(concurrency.max(1))),
            show_progress: false,
        }
    }

    /// Create an orchestrator backed by the npm registry and bundlephobia
    pub fn from_settings(settings: &Settings) -> Result<Self, RegistryError> {
        let client = HttpClient::with_timeout(settings.timeout())?;
        let npm = NpmAdapter::with_base_url(client.clone(), &settings.registry_url);
        let analyzer = DependencyAnalyzer::new(
            NpmAdapter::with_base_url(client.clone(), &settings.registry_url),
            BundlephobiaAdapter::with_base_url(client, &settings.bundle_size_url),
        );

        Ok(Self::new(
            Arc::new(npm),
            Arc::new(analyzer),
            settings.concurrency,
        ))
    }

    /// Enable or disable the spinner
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check the watch list against the saved snapshot
    pub async fn check(
        &self,
        names: &[String],
        saved: &BTreeMap<String, String>,
        detailed: bool,
    ) -> BatchReport {
        let lookups = self.lookup_all(names, detailed, "Checking packages").await;

        let mut report = self.build_report(names, lookups, detailed, |_| true);
        for package in &mut report.packages {
            if let Some(record) = &package.record {
                let status = check_update(
                    saved.get(&package.name).map(String::as_str),
                    &record.current_version,
                );
                if let UpdateStatus::Malformed { reason, .. } = &status {
                    warn!(package = %package.name, "could not compare versions: {}", reason);
                }
                package.status = Some(status);
            }
        }
        report
    }

    /// Look up every package of a preset, marking watch-list membership
    pub async fn preview(
        &self,
        category: &str,
        preset: &Preset,
        watch_list: &[String],
        detailed: bool,
    ) -> PreviewReport {
        let names: Vec<String> = preset.packages.iter().map(|p| p.to_string()).collect();
        let watched: HashSet<&str> = watch_list.iter().map(String::as_str).collect();

        let lookups = self
            .lookup_all(&names, detailed, &format!("Loading {}", preset.name))
            .await;
        let batch = self.build_report(&names, lookups, detailed, |name| watched.contains(name));

        PreviewReport {
            category: category.to_string(),
            preset: preset.key.to_string(),
            name: preset.name.to_string(),
            batch,
            changes: Vec::new(),
        }
    }

    /// Fetch the latest version of every package
    pub async fn snapshot_versions(&self, names: &[String]) -> SnapshotReport {
        let lookups = self.lookup_all(names, false, "Fetching versions").await;

        let mut report = SnapshotReport::default();
        for (name, lookup) in names.iter().zip(lookups) {
            if let Some(record) = lookup.record {
                report.versions.insert(name.clone(), record.current_version);
            }
            report.errors.extend(lookup.errors);
        }
        info!(
            saved = report.versions.len(),
            failed = report.errors.len(),
            "version snapshot built"
        );
        report
    }

    /// Search the registry by free text
    pub async fn search(&self, text: &str) -> Result<Vec<SearchHit>, RegistryError> {
        let mut progress = Progress::new(self.show_progress);
        progress.spinner(&format!("Searching for '{}'...", text));
        let result = self.packages.search(text).await;
        progress.finish_and_clear();
        result
    }

    /// Confirm that a package exists on the registry
    pub async fn verify_package(&self, name: &str) -> Result<PackageRecord, RegistryError> {
        let mut progress = Progress::new(self.show_progress);
        progress.spinner(&format!("Verifying {}...", name));
        let result = self.fetch_info(name).await;
        progress.finish_and_clear();
        result
    }

    fn build_report(
        &self,
        names: &[String],
        lookups: Vec<Lookup>,
        detailed: bool,
        in_watch_list: impl Fn(&str) -> bool,
    ) -> BatchReport {
        let mut packages = Vec::with_capacity(names.len());
        let mut errors = Vec::new();

        for (name, lookup) in names.iter().zip(lookups) {
            errors.extend(lookup.errors);
            packages.push(PackageReport {
                name: name.clone(),
                record: lookup.record,
                status: None,
                analysis: lookup.analysis,
                in_watch_list: in_watch_list(name),
            });
        }

        let summary = detailed.then(|| {
            aggregate(
                packages
                    .iter()
                    .map(|p| (p.name.as_str(), p.analysis.as_ref())),
            )
        });

        BatchReport {
            packages,
            aggregate: summary,
            errors,
        }
    }

    /// Run every lookup concurrently; results keep request order
    async fn lookup_all(&self, names: &[String], detailed: bool, message: &str) -> Vec<Lookup> {
        let mut progress = Progress::new(self.show_progress && !names.is_empty());
        progress.start(names.len() as u64, message);
        let ticker = progress.ticker();

        debug!(count = names.len(), detailed, "starting lookups");
        let lookups = join_all(
            names
                .iter()
                .map(|name| self.lookup(name, detailed, ticker.as_ref())),
        )
        .await;

        progress.finish_and_clear();
        lookups
    }

    async fn lookup(&self, name: &str, detailed: bool, ticker: Option<&ProgressBar>) -> Lookup {
        let mut lookup = Lookup {
            record: None,
            analysis: None,
            errors: Vec::new(),
        };

        match self.fetch_info(name).await {
            Ok(record) => {
                if detailed {
                    match self.fetch_analysis(name, &record.current_version).await {
                        Ok(analysis) => lookup.analysis = Some(analysis),
                        Err(e) => {
                            warn!(package = name, "dependency analysis failed: {}", e);
                            lookup.errors.push(LookupError::new(
                                name,
                                format!("dependency analysis failed: {}", e),
                            ));
                        }
                    }
                }
                lookup.record = Some(record);
            }
            Err(e) => {
                warn!(package = name, "lookup failed: {}", e);
                lookup.errors.push(LookupError::new(name, e.to_string()));
            }
        }

        if let Some(bar) = ticker {
            bar.inc(1);
        }
        lookup
    }

    async fn fetch_info(&self, name: &str) -> Result<PackageRecord, RegistryError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| RegistryError::network_error(name, "npm", e.to_string()))?;
        self.packages.fetch_package_info(name).await
    }

    async fn fetch_analysis(
        &self,
        name: &str,
        version: &str,
    ) -> Result<DependencyAnalysis, RegistryError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| RegistryError::network_error(name, "npm", e.to_string()))?;
        self.analyses.analyze(name, version).await
    }
}
