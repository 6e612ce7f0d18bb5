//! Station dataset client, disk cache, and catalog.
//!
//! Provides telecode ↔ name ↔ city lookups over the upstream station
//! dataset, fetched at startup (disk cache first) and refreshed daily.

mod cache;
mod catalog;
mod client;
mod error;

pub use cache::{StationCache, StationCacheConfig};
pub use catalog::StationCatalog;
pub use client::{Station, StationClient, StationClientConfig, parse_station_script};
pub use error::StationError;
