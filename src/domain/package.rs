//! Package metadata as reported by the registry

use crate::error::ConfigError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Description used when the registry has none
pub const NO_DESCRIPTION: &str = "No description available";

/// Longest package name the npm registry accepts
pub const MAX_NAME_LENGTH: usize = 214;

// URL-safe name with an optional @scope/ prefix; no leading '.' or '_'.
// Uppercase is allowed since older registry packages (JSONStream) use it.
static PACKAGE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:@[a-zA-Z0-9~!'()*-][a-zA-Z0-9._~!'()*-]*/)?",
        r"[a-zA-Z0-9~!'()*-][a-zA-Z0-9._~!'()*-]*$"
    ))
    .unwrap()
});

/// Names the registry reserves
const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Check that `name` could exist on the npm registry
///
/// Follows the rule for legacy packages, so mixed-case names pass; whether
/// the package actually exists is left to the registry.
pub fn validate_package_name(name: &str) -> Result<(), ConfigError> {
    if name.len() > MAX_NAME_LENGTH
        || RESERVED_NAMES.contains(&name.to_lowercase().as_str())
        || !PACKAGE_NAME_RE.is_match(name)
    {
        return Err(ConfigError::InvalidPackageName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Latest published state of a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Package name
    pub name: String,
    /// Latest published version (the `latest` dist-tag)
    pub current_version: String,
    /// When the package metadata was last modified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    /// Package description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Project homepage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

impl PackageRecord {
    /// Creates a record with only name and version
    pub fn new(name: impl Into<String>, current_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            current_version: current_version.into(),
            last_update: None,
            description: None,
            homepage: None,
        }
    }

    /// Sets the last update time (builder pattern)
    pub fn with_last_update(mut self, last_update: DateTime<Utc>) -> Self {
        self.last_update = Some(last_update);
        self
    }

    /// Sets the description (builder pattern)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the homepage (builder pattern)
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Description or a placeholder
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }
}

/// One entry of a registry search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub description: String,
}

impl SearchHit {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        }
    }
}

/// What happened to one package on a watch-list mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    AlreadyPresent,
    Removed,
    NotPresent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchListChange {
    pub package: String,
    pub kind: ChangeKind,
}

impl WatchListChange {
    pub fn new(package: impl Into<String>, kind: ChangeKind) -> Self {
        Self {
            package: package.into(),
            kind,
        }
    }
}
