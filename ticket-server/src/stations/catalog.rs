//! Station catalog: lookups over the parsed dataset.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use super::cache::StationCache;
use super::client::{Station, StationClient};
use super::error::StationError;

/// Thread-safe station catalog.
///
/// Offers telecode/name/city lookups and keyword search, with support for
/// background refresh. Cheap to clone; clones share the same data.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<CatalogIndex>>,
    client: StationClient,
    disk: Option<StationCache>,
}

impl StationCatalog {
    /// Load the catalog: disk cache first, network otherwise.
    ///
    /// Fails only when both sources are unavailable.
    pub async fn load(
        client: StationClient,
        disk: Option<StationCache>,
    ) -> Result<Self, StationError> {
        let stations = match disk.as_ref().and_then(|cache| cache.load()) {
            Some(stations) => {
                info!(count = stations.len(), "loaded stations from disk cache");
                stations
            }
            None => {
                let stations = client.fetch_all().await?;
                if let Some(cache) = &disk
                    && let Err(e) = cache.save(&stations)
                {
                    // A failed cache write is not fatal; we have the data.
                    tracing::warn!("failed to write station cache: {e}");
                }
                stations
            }
        };

        Ok(Self {
            inner: Arc::new(RwLock::new(CatalogIndex::build(stations))),
            client,
            disk,
        })
    }

    /// Create an empty catalog (for tests).
    pub fn empty(client: StationClient) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CatalogIndex::build(Vec::new()))),
            client,
            disk: None,
        }
    }

    /// Refresh the dataset from the network.
    ///
    /// On success, replaces the current index and rewrites the disk cache.
    /// On failure, the existing data is preserved and the error returned.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let stations = self.client.fetch_all().await?;
        let count = stations.len();

        if let Some(cache) = &self.disk
            && let Err(e) = cache.save(&stations)
        {
            tracing::warn!("failed to write station cache: {e}");
        }

        let mut guard = self.inner.write().await;
        *guard = CatalogIndex::build(stations);

        Ok(count)
    }

    /// Number of stations in the catalog.
    pub async fn len(&self) -> usize {
        self.inner.read().await.stations.len()
    }

    /// Whether the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.stations.is_empty()
    }

    /// Look up a station by telecode.
    pub async fn find_by_code(&self, telecode: &str) -> Option<Station> {
        let guard = self.inner.read().await;
        guard.by_telecode(telecode).cloned()
    }

    /// Look up a station by exact display name.
    pub async fn find_by_name(&self, name: &str) -> Option<Station> {
        let guard = self.inner.read().await;
        guard.by_name(name).cloned()
    }

    /// All stations in a city.
    pub async fn in_city(&self, city: &str) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard.in_city(city).cloned().collect()
    }

    /// Keyword search over names and pinyin, capped at `limit` results.
    pub async fn search(&self, keyword: &str, limit: usize) -> Vec<Station> {
        let guard = self.inner.read().await;
        guard.search(keyword, limit)
    }
}

/// Index over the station list.
struct CatalogIndex {
    stations: Vec<Station>,
    code_to_idx: HashMap<String, usize>,
    name_to_idx: HashMap<String, usize>,
    city_to_idx: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    fn build(stations: Vec<Station>) -> Self {
        let mut code_to_idx = HashMap::with_capacity(stations.len());
        let mut name_to_idx = HashMap::with_capacity(stations.len());
        let mut city_to_idx: HashMap<String, Vec<usize>> = HashMap::new();

        for (idx, station) in stations.iter().enumerate() {
            code_to_idx.insert(station.telecode.clone(), idx);
            name_to_idx.insert(station.name.clone(), idx);
            city_to_idx.entry(station.city.clone()).or_default().push(idx);
        }

        Self {
            stations,
            code_to_idx,
            name_to_idx,
            city_to_idx,
        }
    }

    fn by_telecode(&self, telecode: &str) -> Option<&Station> {
        self.code_to_idx.get(telecode).map(|&i| &self.stations[i])
    }

    fn by_name(&self, name: &str) -> Option<&Station> {
        self.name_to_idx.get(name).map(|&i| &self.stations[i])
    }

    fn in_city(&self, city: &str) -> impl Iterator<Item = &Station> {
        self.city_to_idx
            .get(city)
            .into_iter()
            .flatten()
            .map(|&i| &self.stations[i])
    }

    /// A station matches when its name contains the keyword, or its pinyin
    /// or abbreviation starts with the keyword (case-insensitive).
    fn search(&self, keyword: &str, limit: usize) -> Vec<Station> {
        let lower = keyword.to_lowercase();

        self.stations
            .iter()
            .filter(|s| {
                s.name.contains(keyword)
                    || s.pinyin.to_lowercase().starts_with(&lower)
                    || s.abbrev.to_lowercase().starts_with(&lower)
            })
            .take(limit)
            .cloned()
            .collect()
    }
}
