//! Dependency analysis backed by the npm registry and bundlephobia

use crate::domain::DependencyAnalysis;
use crate::error::RegistryError;
use crate::registry::{BundlephobiaAdapter, DependencySource, NpmAdapter};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Combines a version manifest with its bundle size
///
/// The manifest is required. The bundle size is optional: when bundlephobia
/// fails the analysis is still returned, just without a size. The two
/// requests are issued one after the other.
pub struct DependencyAnalyzer {
    npm: NpmAdapter,
    bundles: BundlephobiaAdapter,
}

impl DependencyAnalyzer {
    pub fn new(npm: NpmAdapter, bundles: BundlephobiaAdapter) -> Self {
        Self { npm, bundles }
    }
}

#[async_trait]
impl DependencySource for DependencyAnalyzer {
    async fn analyze(
        &self,
        package: &str,
        version: &str,
    ) -> Result<DependencyAnalysis, RegistryError> {
        // Sequential: the caller's permit covers one open connection
        let manifest = self.npm.fetch_manifest(package, version).await?;

        let bundle_size = match self.bundles.fetch_size(package, version).await {
            Ok(size) => Some(size),
            Err(e) => {
                warn!(package, version, "bundle size unavailable: {}", e);
                None
            }
        };

        let analysis = DependencyAnalysis {
            dependencies: manifest.dependencies(),
            peer_dependencies: manifest.peer_dependencies(),
            dev_dependencies: manifest.dev_dependencies(),
            bundle_size,
        };
        debug!(
            package,
            version,
            dependencies = analysis.dependencies.len(),
            peers = analysis.peer_dependencies.len(),
            "analyzed"
        );

        Ok(analysis)
    }
}
