//! bundlephobia size API adapter
//!
//! API endpoint: https://bundlephobia.com/api/size?package={name}@{version}

use crate::domain::BundleSize;
use crate::error::RegistryError;
use crate::registry::client::parse_base_url;
use crate::registry::HttpClient;
use reqwest::Url;
use serde::Deserialize;

/// bundlephobia base URL
pub const BUNDLEPHOBIA_URL: &str = "https://bundlephobia.com";

const REGISTRY_NAME: &str = "bundlephobia";

/// Size response; failed builds come back without the numeric fields
#[derive(Debug, Deserialize)]
struct SizeResponse {
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    gzip: Option<u64>,
}

/// bundlephobia adapter
pub struct BundlephobiaAdapter {
    client: HttpClient,
    base_url: String,
}

impl BundlephobiaAdapter {
    /// Create a new adapter against the public service
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, BUNDLEPHOBIA_URL)
    }

    /// Create a new adapter against a custom URL
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self, package: &str, version: &str) -> Result<Url, RegistryError> {
        let base = parse_base_url(&format!("{}/api/size", self.base_url), REGISTRY_NAME)?;
        let spec = format!("{}@{}", package, version);
        Url::parse_with_params(base.as_str(), &[("package", spec.as_str())])
            .map_err(|e| RegistryError::network_error(package, REGISTRY_NAME, e.to_string()))
    }

    /// Fetch the bundle size of one package version
    pub async fn fetch_size(
        &self,
        package: &str,
        version: &str,
    ) -> Result<BundleSize, RegistryError> {
        let url = self.build_url(package, version)?;
        let response: SizeResponse = self.client.get_json(url, package, REGISTRY_NAME).await?;

        match (response.size, response.gzip) {
            (Some(size), Some(gzip)) => Ok(BundleSize::new(size, gzip)),
            _ => Err(RegistryError::invalid_response(
                package,
                REGISTRY_NAME,
                "missing size or gzip",
            )),
        }
    }
}
