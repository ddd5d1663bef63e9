//! lib-check - npm package watch list library
//!
//! This library provides the core functionality behind the `lib-check` CLI:
//! - Strict version parsing and MAJOR/MINOR/PATCH classification
//! - Cross-package aggregation of dependency and bundle size data
//! - npm registry and bundlephobia adapters
//! - A persisted per-user watch list

pub mod cli;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod presets;
pub mod progress;
pub mod registry;
pub mod settings;
pub mod store;
pub mod update;
