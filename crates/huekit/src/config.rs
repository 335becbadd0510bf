//! YAML configuration for the `huekit` binary.
//!
//! Looked up in order: `--config <path>`, `$HUEKIT_CONFIG`, then
//! `<config_dir>/huekit/config.yaml`. A missing default file is not an
//! error; every field has a default.
//!
//! ```yaml
//! store_dir: ~/.local/share/huekit
//! client_id: studio
//! debounce_ms: 150
//! cache_capacity: 0   # session-scoped cache
//! recent_days: 7
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use huekit_palette::{CachePolicy, DEFAULT_CAPACITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "HUEKIT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of the file store. Defaults to `<data_dir>/huekit`.
    pub store_dir: Option<PathBuf>,
    /// Embedded in new theme ids.
    pub client_id: String,
    pub debounce_ms: u64,
    /// Palette cache size; `0` keeps every scale until the session ends.
    pub cache_capacity: usize,
    /// Age in days under which a saved theme is listed as new.
    pub recent_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            client_id: "local".to_string(),
            debounce_ms: 200,
            cache_capacity: DEFAULT_CAPACITY,
            recent_days: 7,
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str, path: &Path) -> Result<Self, ConfigError> {
        // An empty file deserializes as null rather than an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml, path)
    }

    /// `<config_dir>/huekit/config.yaml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("huekit").join("config.yaml"))
    }

    /// Resolves the config from an explicit path or the environment value.
    ///
    /// Explicit and environment paths must exist; the default path is
    /// optional.
    pub fn resolve_from(
        explicit: Option<&Path>,
        env: Option<OsString>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Some(path) = env.filter(|p| !p.is_empty()) {
            return Self::load(Path::new(&path));
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_from(explicit, std::env::var_os(CONFIG_ENV))
    }

    /// The configured store directory, or `<data_dir>/huekit`.
    pub fn store_dir(&self) -> PathBuf {
        self.store_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("huekit")))
            .unwrap_or_else(|| PathBuf::from(".huekit"))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy::from_capacity(self.cache_capacity)
    }
}
