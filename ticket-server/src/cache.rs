//! Caching layer for upstream ticket queries.
//!
//! Every ticket query costs two upstream round-trips (session cookie +
//! query), and the upstream throttles aggressively. Identical queries
//! within a short window are served from cache instead.
//!
//! Entries hold decoded records *before* category filtering: the filter
//! varies per request and is cheap, decoding and the network are not.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;

use crate::decode::TicketRecord;
use crate::railway::{RailwayClient, RailwayError};

/// Cache key: (travel date, from telecode, to telecode).
type QueryKey = (NaiveDate, String, String);

/// Cached decoded result for one query.
type QueryEntry = Arc<Vec<TicketRecord>>;

/// Configuration for the query cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// Railway client with query caching.
///
/// Wraps a [`RailwayClient`] and caches decoded query results.
pub struct CachedRailwayClient {
    client: RailwayClient,
    cache: MokaCache<QueryKey, QueryEntry>,
}

impl CachedRailwayClient {
    /// Create a new cached client.
    pub fn new(client: RailwayClient, config: &CacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, cache }
    }

    /// Query decoded tickets, using the cache if available.
    ///
    /// Errors are not cached; a failed query is retried on the next call.
    pub async fn query_tickets(
        &self,
        date: NaiveDate,
        from_telecode: &str,
        to_telecode: &str,
    ) -> Result<QueryEntry, RailwayError> {
        let key = (date, from_telecode.to_string(), to_telecode.to_string());

        if let Some(entry) = self.cache.get(&key).await {
            return Ok(entry);
        }

        let tickets = self
            .client
            .query_tickets(date, from_telecode, to_telecode)
            .await?;

        let entry = Arc::new(tickets);
        self.cache.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Number of cached queries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }
}
