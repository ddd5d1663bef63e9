//! Persistent user configuration
//!
//! This module provides:
//! - `KeyValueStore`: get/set/delete by key over JSON values
//! - `JsonFileStore`: store persisted as a single JSON file
//! - `MemoryStore`: in-process store for tests
//! - `WatchRepository`: typed access to user id, watch lists and saved versions

mod file;
mod memory;
mod repository;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::{WatchRepository, LIBRARIES_PREFIX, USER_ID_KEY, VERSIONS_PREFIX};

use crate::error::StoreError;
use serde_json::Value;

/// Key-value storage keyed by plain strings
///
/// Keys are opaque: a user id containing dots does not create nesting.
pub trait KeyValueStore {
    /// Returns the value for `key`, if present
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Removes `key`; returns true if it was present
    fn delete(&mut self, key: &str) -> Result<bool, StoreError>;

    /// Removes every key
    fn clear(&mut self) -> Result<(), StoreError>;
}
