//! Data-source adapters for package information
//!
//! This module provides:
//! - HTTP client shared foundation
//! - npm Registry adapter (metadata, version manifests, search)
//! - bundlephobia adapter (bundle sizes)
//! - Dependency analyzer combining the two
//!
//! The orchestrator only sees the `PackageSource` and `DependencySource`
//! traits, so tests can substitute in-memory fakes.

mod analyzer;
mod bundlephobia;
mod client;
mod npm;

pub use analyzer::DependencyAnalyzer;
pub use bundlephobia::{BundlephobiaAdapter, BUNDLEPHOBIA_URL};
pub use client::{HttpClient, DEFAULT_TIMEOUT};
pub use npm::{NpmAdapter, VersionManifest, MIN_SEARCH_LENGTH, NPM_REGISTRY_URL};

use crate::domain::{DependencyAnalysis, PackageRecord, SearchHit};
use crate::error::RegistryError;
use async_trait::async_trait;

/// Source of package metadata and search results
#[async_trait]
pub trait PackageSource: Send + Sync {
    /// Fetch the latest published state of a package
    async fn fetch_package_info(&self, package: &str) -> Result<PackageRecord, RegistryError>;

    /// Search packages by free text
    async fn search(&self, text: &str) -> Result<Vec<SearchHit>, RegistryError>;
}

/// Source of per-version dependency analyses
#[async_trait]
pub trait DependencySource: Send + Sync {
    /// Analyze the dependencies and bundle size of one package version
    async fn analyze(
        &self,
        package: &str,
        version: &str,
    ) -> Result<DependencyAnalysis, RegistryError>;
}
