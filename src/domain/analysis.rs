//! Dependency analysis of one package version

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Minified and gzipped bundle size in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSize {
    pub size: u64,
    pub gzip: u64,
}

impl BundleSize {
    pub fn new(size: u64, gzip: u64) -> Self {
        Self { size, gzip }
    }
}

/// Declared dependencies and bundle size of a specific package version
///
/// Maps are keyed by dependency name with the declared range as value.
/// A manifest without a section yields an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyAnalysis {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    /// Absent when the size service had no answer; serialized as `null`
    #[serde(default)]
    pub bundle_size: Option<BundleSize>,
}

impl DependencyAnalysis {
    /// Creates an empty analysis
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a runtime dependency (builder pattern)
    pub fn with_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), range.into());
        self
    }

    /// Adds a peer dependency (builder pattern)
    pub fn with_peer_dependency(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.peer_dependencies.insert(name.into(), range.into());
        self
    }

    /// Adds a development dependency (builder pattern)
    pub fn with_dev_dependency(
        mut self,
        name: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        self.dev_dependencies.insert(name.into(), range.into());
        self
    }

    /// Sets the bundle size (builder pattern)
    pub fn with_bundle_size(mut self, size: u64, gzip: u64) -> Self {
        self.bundle_size = Some(BundleSize::new(size, gzip));
        self
    }
}
