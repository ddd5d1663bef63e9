//! Runtime settings and configuration directory resolution

use crate::error::ConfigError;
use crate::registry::{BUNDLEPHOBIA_URL, NPM_REGISTRY_URL};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "LIB_CHECK_CONFIG_DIR";

/// Name of the settings file inside the configuration directory
pub const SETTINGS_FILE: &str = "config.toml";

/// Name of the store file inside the configuration directory
pub const STORE_FILE: &str = "store.json";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of concurrent lookups
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Settings read from `config.toml`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the npm registry
    pub registry_url: String,
    /// Base URL of the bundle size service
    pub bundle_size_url: String,
    pub timeout_secs: u64,
    /// Maximum number of in-flight lookups
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            registry_url: NPM_REGISTRY_URL.to_string(),
            bundle_size_url: BUNDLEPHOBIA_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Settings {
    /// Load settings from `<dir>/config.toml`; a missing file yields defaults
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(SETTINGS_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::InvalidSettings {
                    path,
                    message: e.to_string(),
                })
            }
        };

        let settings: Settings =
            toml::from_str(&content).map_err(|e| ConfigError::InvalidSettings {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if settings.concurrency == 0 {
            return Err(ConfigError::InvalidSettings {
                path,
                message: "concurrency must be at least 1".to_string(),
            });
        }
        if settings.timeout_secs == 0 {
            return Err(ConfigError::InvalidSettings {
                path,
                message: "timeout_secs must be at least 1".to_string(),
            });
        }

        Ok(settings)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Returns the configuration directory for lib-check.
/// Uses $LIB_CHECK_CONFIG_DIR if set, otherwise the platform config
/// directory joined with `lib-check`, or ./lib-check if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var(CONFIG_DIR_ENV).ok(), dirs::config_dir())
}

/// Returns the path to the store file inside `dir`
pub fn store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE)
}

fn config_dir_with_env(override_dir: Option<String>, platform_dir: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    platform_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lib-check")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_returns_defaults_when_file_missing() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.registry_url, "https://registry.npmjs.org");
        assert_eq!(settings.bundle_size_url, "https://bundlephobia.com");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.concurrency, 10);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            "registry_url = \"http://localhost:4873\"\nconcurrency = 4\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.registry_url, "http://localhost:4873");
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.bundle_size_url, BUNDLEPHOBIA_URL);
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "timeout_secs = \"soon\"").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSettings { .. }));
    }

    #[test]
    fn load_rejects_zero_concurrency() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "concurrency = 0").unwrap();

        assert!(Settings::load(dir.path()).is_err());
    }

    #[test]
    fn load_rejects_zero_timeout() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "timeout_secs = 0").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("timeout_secs must be at least 1"));
    }

    #[test]
    fn config_dir_with_env_prefers_override() {
        let path = config_dir_with_env(
            Some("/tmp/lib-check-test".to_string()),
            Some(PathBuf::from("/home/user/.config")),
        );
        assert_eq!(path, PathBuf::from("/tmp/lib-check-test"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_platform_dir() {
        let path = config_dir_with_env(None, Some(PathBuf::from("/home/user/.config")));
        assert_eq!(path, PathBuf::from("/home/user/.config/lib-check"));

        let path = config_dir_with_env(Some(String::new()), Some(PathBuf::from("/cfg")));
        assert_eq!(path, PathBuf::from("/cfg/lib-check"));
    }

    #[test]
    fn config_dir_with_env_falls_back_to_current_dir() {
        let path = config_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./lib-check"));
    }

    #[test]
    fn store_path_joins_store_file() {
        assert_eq!(
            store_path(Path::new("/cfg/lib-check")),
            PathBuf::from("/cfg/lib-check/store.json")
        );
    }
}
