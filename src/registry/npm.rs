//! npm Registry adapter
//!
//! Fetches package metadata, per-version manifests and search results.
//! API endpoints:
//! - https://registry.npmjs.org/{package}
//! - https://registry.npmjs.org/{package}/{version}
//! - https://registry.npmjs.org/-/v1/search?text={text}&size=10

use crate::domain::{PackageRecord, SearchHit};
use crate::error::RegistryError;
use crate::registry::client::parse_base_url;
use crate::registry::{HttpClient, PackageSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// npm registry base URL
pub const NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Number of results requested from the search endpoint
const SEARCH_SIZE: &str = "10";

/// Search text shorter than this returns no results
pub const MIN_SEARCH_LENGTH: usize = 3;

const REGISTRY_NAME: &str = "npm";

/// npm Registry adapter
pub struct NpmAdapter {
    client: HttpClient,
    base_url: String,
}

/// npm package metadata response (packument)
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    /// Values are timestamps, except `unpublished` which is an object
    #[serde(default)]
    time: HashMap<String, Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default)]
    homepage: Option<Value>,
}

/// Manifest of a single published version
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionManifest {
    #[serde(default)]
    dependencies: Option<Value>,
    #[serde(default)]
    dev_dependencies: Option<Value>,
    #[serde(default)]
    peer_dependencies: Option<Value>,
}

impl VersionManifest {
    /// Runtime dependencies (name → range)
    pub fn dependencies(&self) -> BTreeMap<String, String> {
        dependency_map(self.dependencies.as_ref())
    }

    /// Development dependencies (name → range)
    pub fn dev_dependencies(&self) -> BTreeMap<String, String> {
        dependency_map(self.dev_dependencies.as_ref())
    }

    /// Peer dependencies (name → range)
    pub fn peer_dependencies(&self) -> BTreeMap<String, String> {
        dependency_map(self.peer_dependencies.as_ref())
    }
}

/// Convert a dependency section into a name → range map
///
/// Some very old manifests carry arrays or null here; anything that is not
/// an object is treated as an empty section.
fn dependency_map(section: Option<&Value>) -> BTreeMap<String, String> {
    match section {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(name, range)| {
                let range = match range {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), range)
            })
            .collect(),
        _ => BTreeMap::new(),
    }
}

/// Search endpoint response
#[derive(Debug, Deserialize)]
struct NpmSearchResponse {
    #[serde(default)]
    objects: Vec<NpmSearchObject>,
}

#[derive(Debug, Deserialize)]
struct NpmSearchObject {
    package: NpmSearchPackage,
}

#[derive(Debug, Deserialize)]
struct NpmSearchPackage {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

fn string_field(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

impl NpmAdapter {
    /// Create a new npm adapter against the public registry
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, NPM_REGISTRY_URL)
    }

    /// Create a new npm adapter against a custom registry URL
    pub fn with_base_url(client: HttpClient, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package: &str) -> String {
        if package.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package.replace('/', "%2F")
        } else {
            package.to_string()
        }
    }

    /// Build the URL for a package
    fn build_url(&self, package: &str) -> Result<Url, RegistryError> {
        self.parse_url(&format!(
            "{}/{}",
            self.base_url,
            Self::encode_package_name(package)
        ))
    }

    /// Build the URL for a specific version of a package
    fn build_version_url(&self, package: &str, version: &str) -> Result<Url, RegistryError> {
        self.parse_url(&format!(
            "{}/{}/{}",
            self.base_url,
            Self::encode_package_name(package),
            version
        ))
    }

    /// Build the search URL
    fn build_search_url(&self, text: &str) -> Result<Url, RegistryError> {
        let base = parse_base_url(&format!("{}/-/v1/search", self.base_url), REGISTRY_NAME)?;
        Url::parse_with_params(base.as_str(), &[("text", text), ("size", SEARCH_SIZE)])
            .map_err(|e| RegistryError::network_error(text, REGISTRY_NAME, e.to_string()))
    }

    fn parse_url(&self, url: &str) -> Result<Url, RegistryError> {
        Url::parse(url).map_err(|e| {
            RegistryError::network_error(url, REGISTRY_NAME, format!("invalid URL: {}", e))
        })
    }

    /// Fetch the manifest of one published version
    pub async fn fetch_manifest(
        &self,
        package: &str,
        version: &str,
    ) -> Result<VersionManifest, RegistryError> {
        let url = self.build_version_url(package, version)?;
        self.client.get_json(url, package, REGISTRY_NAME).await
    }
}

#[async_trait]
impl PackageSource for NpmAdapter {
    async fn fetch_package_info(&self, package: &str) -> Result<PackageRecord, RegistryError> {
        let url = self.build_url(package)?;
        let mut response: NpmPackageResponse =
            self.client.get_json(url, package, REGISTRY_NAME).await?;

        let latest = response.dist_tags.remove("latest").ok_or_else(|| {
            RegistryError::invalid_response(package, REGISTRY_NAME, "missing dist-tags.latest")
        })?;

        let mut record = PackageRecord::new(package, latest);

        if let Some(modified) = response.time.get("modified").and_then(Value::as_str) {
            match modified.parse::<DateTime<Utc>>() {
                Ok(date) => record = record.with_last_update(date),
                Err(e) => warn!(package, modified, "unparseable modification time: {}", e),
            }
        }
        if let Some(description) = string_field(response.description) {
            record = record.with_description(description);
        }
        if let Some(homepage) = string_field(response.homepage) {
            record = record.with_homepage(homepage);
        }

        Ok(record)
    }

    async fn search(&self, text: &str) -> Result<Vec<SearchHit>, RegistryError> {
        if text.chars().count() < MIN_SEARCH_LENGTH {
            return Ok(Vec::new());
        }

        let url = self.build_search_url(text)?;
        let response: NpmSearchResponse = self.client.get_json(url, text, REGISTRY_NAME).await?;

        Ok(response
            .objects
            .into_iter()
            .map(|o| SearchHit::new(o.package.name, o.package.description))
            .collect())
    }
}
