//! Disk cache for the station dataset.
//!
//! The dataset is a ~2 MB script that changes rarely; caching it on disk
//! lets restarts skip the download and survives short upstream outages.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::client::Station;
use super::error::StationError;

/// Default cache TTL: 24 hours.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// On-disk cache format.
#[derive(Debug, Serialize, Deserialize)]
struct CachedStations {
    /// Unix timestamp when the cache was written.
    cached_at: i64,
    /// The cached dataset.
    stations: Vec<Station>,
}

/// Configuration for the station disk cache.
#[derive(Debug, Clone)]
pub struct StationCacheConfig {
    /// Path to the cache file.
    pub path: PathBuf,
    /// How long the cache remains valid.
    pub ttl: Duration,
}

impl StationCacheConfig {
    /// Create a cache config with the given path and default TTL (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for StationCacheConfig {
    fn default() -> Self {
        Self::new("stations_cache.json")
    }
}

/// Disk cache for the station dataset.
#[derive(Debug, Clone)]
pub struct StationCache {
    config: StationCacheConfig,
}

impl StationCache {
    /// Create a station cache with the given config.
    pub fn new(config: StationCacheConfig) -> Self {
        Self { config }
    }

    /// Try to load the dataset from the cache.
    ///
    /// Returns `None` if the cache file doesn't exist, can't be parsed, or
    /// has expired.
    pub fn load(&self) -> Option<Vec<Station>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let cached: CachedStations = serde_json::from_str(&contents).ok()?;

        let age = chrono::Utc::now().timestamp().saturating_sub(cached.cached_at);
        if age < 0 || age as u64 >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.stations)
    }

    /// Save the dataset to the cache, creating parent directories as needed.
    pub fn save(&self, stations: &[Station]) -> Result<(), StationError> {
        let cached = CachedStations {
            cached_at: chrono::Utc::now().timestamp(),
            stations: stations.to_vec(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StationError::Cache {
                message: format!("failed to create cache directory: {e}"),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| StationError::Cache {
            message: format!("failed to serialize cache: {e}"),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| StationError::Cache {
            message: format!("failed to write cache file: {e}"),
        })?;

        Ok(())
    }

    /// The cache file path.
    pub fn path(&self) -> &Path {
        &self.config.path
    }
}
