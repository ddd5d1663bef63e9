//! Core domain models for lib-check
//!
//! This module contains the fundamental types used throughout the application:
//! - Strict version triples and update classification results
//! - Package metadata and search results
//! - Dependency analyses and their cross-package aggregate

mod aggregate;
mod analysis;
mod package;
mod update_type;
mod version;

pub use aggregate::{aggregate, PresetAggregate};
pub use analysis::{BundleSize, DependencyAnalysis};
pub use package::{
    validate_package_name, ChangeKind, PackageRecord, SearchHit, WatchListChange,
    MAX_NAME_LENGTH, NO_DESCRIPTION,
};
pub use update_type::UpdateType;
pub use version::Version;
