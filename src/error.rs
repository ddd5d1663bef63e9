//! Application error types using thiserror
//!
//! Error hierarchy:
//! - VersionError: Version strings that cannot be compared
//! - RegistryError: Issues with npm registry / bundle size communication
//! - StoreError: Issues with the persisted key-value store
//! - ConfigError: Issues with user configuration, CLI input and settings

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Version parsing errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Package registry related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Store related errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while parsing a version string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    /// Version does not consist of exactly three numeric components
    #[error("malformed version '{input}': {reason}")]
    Malformed { input: String, reason: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },
}

/// Errors related to the persisted store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the store file
    #[error("failed to read store file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the store file
    #[error("failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file exists but is not valid JSON
    #[error("failed to parse store file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A stored value has an unexpected shape
    #[error("unexpected value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No user id has been configured yet
    #[error("no user ID configured; run `lib-check config --change <ID>` first")]
    UserNotSet,

    /// User id is empty or whitespace only
    #[error("invalid user ID '{value}': user ID is required")]
    InvalidUserId { value: String },

    /// Package name does not follow npm naming rules
    #[error("invalid package name '{name}'")]
    InvalidPackageName { name: String },

    /// Preset category does not exist
    #[error("unknown preset category '{category}'")]
    UnknownCategory { category: String },

    /// Preset does not exist in the category
    #[error("unknown preset '{preset}' in category '{category}'")]
    UnknownPreset { category: String, preset: String },

    /// Settings file could not be loaded
    #[error("invalid settings file {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },
}

impl VersionError {
    /// Creates a new Malformed error
    pub fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        VersionError::Malformed {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl StoreError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new InvalidValue error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}
