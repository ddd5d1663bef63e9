//! Typed access to per-user settings on top of a `KeyValueStore`

use super::KeyValueStore;
use crate::error::{AppError, ConfigError, StoreError};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Key holding the active user id
pub const USER_ID_KEY: &str = "userId";

/// Key prefix for a user's watch list
pub const LIBRARIES_PREFIX: &str = "libraries.";

/// Key prefix for a user's saved version snapshot
pub const VERSIONS_PREFIX: &str = "versions.";

fn libraries_key(user: &str) -> String {
    format!("{}{}", LIBRARIES_PREFIX, user)
}

fn versions_key(user: &str) -> String {
    format!("{}{}", VERSIONS_PREFIX, user)
}

/// Repository for the user id, watch lists and saved versions
pub struct WatchRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> WatchRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consume the repository and return the underlying store
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Returns the configured user id
    pub fn user_id(&self) -> Result<Option<String>, StoreError> {
        match self.store.get(USER_ID_KEY)? {
            Some(Value::String(id)) if !id.trim().is_empty() => Ok(Some(id)),
            Some(Value::String(_)) | None => Ok(None),
            Some(other) => Err(StoreError::invalid_value(
                USER_ID_KEY,
                format!("expected a string, found {}", other),
            )),
        }
    }

    /// Returns the configured user id or a `UserNotSet` error
    pub fn require_user_id(&self) -> Result<String, AppError> {
        self.user_id()?
            .ok_or_else(|| ConfigError::UserNotSet.into())
    }

    /// Sets or changes the user id
    ///
    /// When a different user was active, their watch list and saved versions
    /// move to the new id. Returns the previous id.
    pub fn change_user_id(&mut self, new_id: &str) -> Result<Option<String>, AppError> {
        let new_id = new_id.trim();
        if new_id.is_empty() {
            return Err(ConfigError::InvalidUserId {
                value: new_id.to_string(),
            }
            .into());
        }

        let old_id = self.user_id()?;
        if old_id.as_deref() == Some(new_id) {
            return Ok(old_id);
        }

        if let Some(old) = old_id.as_deref() {
            let libraries = self.libraries(old)?;
            let versions = self.saved_versions(old)?;
            self.store.set(&libraries_key(new_id), json!(libraries))?;
            self.store.set(&versions_key(new_id), json!(versions))?;
            self.store.delete(&libraries_key(old))?;
            self.store.delete(&versions_key(old))?;
            debug!(from = old, to = new_id, "moved user data");
        } else if self.store.get(&libraries_key(new_id))?.is_none() {
            self.store.set(&libraries_key(new_id), json!([]))?;
        }

        self.store.set(USER_ID_KEY, json!(new_id))?;
        Ok(old_id)
    }

    /// Returns the watch list of `user`
    ///
    /// A value of the wrong shape is treated as an empty list.
    pub fn libraries(&self, user: &str) -> Result<Vec<String>, StoreError> {
        let key = libraries_key(user);
        match self.store.get(&key)? {
            Some(Value::Array(items)) => Ok(items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect()),
            Some(other) => {
                warn!(key, "ignoring non-array watch list: {}", other);
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Adds `package` to the watch list; returns false if already present
    pub fn add_library(&mut self, user: &str, package: &str) -> Result<bool, StoreError> {
        let mut libraries = self.libraries(user)?;
        if libraries.iter().any(|l| l == package) {
            return Ok(false);
        }
        libraries.push(package.to_string());
        self.store.set(&libraries_key(user), json!(libraries))?;
        Ok(true)
    }

    /// Removes `package` from the watch list; returns false if absent
    pub fn remove_library(&mut self, user: &str, package: &str) -> Result<bool, StoreError> {
        let mut libraries = self.libraries(user)?;
        let Some(index) = libraries.iter().position(|l| l == package) else {
            return Ok(false);
        };
        libraries.remove(index);
        self.store.set(&libraries_key(user), json!(libraries))?;
        Ok(true)
    }

    /// Replaces the saved version snapshot of `user`
    pub fn save_versions(
        &mut self,
        user: &str,
        versions: &BTreeMap<String, String>,
    ) -> Result<(), StoreError> {
        self.store.set(&versions_key(user), json!(versions))
    }

    /// Returns the saved version snapshot of `user`
    pub fn saved_versions(&self, user: &str) -> Result<BTreeMap<String, String>, StoreError> {
        let key = versions_key(user);
        match self.store.get(&key)? {
            Some(Value::Object(map)) => Ok(map
                .into_iter()
                .filter_map(|(name, version)| match version {
                    Value::String(v) => Some((name, v)),
                    _ => None,
                })
                .collect()),
            Some(other) => {
                warn!(key, "ignoring non-object version snapshot: {}", other);
                Ok(BTreeMap::new())
            }
            None => Ok(BTreeMap::new()),
        }
    }

    /// Removes every stored value
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.clear()
    }
}
