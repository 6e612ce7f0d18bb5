//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRailwayClient;
use crate::stations::StationCatalog;

/// Shared application state.
///
/// Contains the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached upstream railway client
    pub railway: Arc<CachedRailwayClient>,

    /// Station catalog
    pub stations: StationCatalog,
}

impl AppState {
    /// Create a new app state.
    pub fn new(railway: CachedRailwayClient, stations: StationCatalog) -> Self {
        Self {
            railway: Arc::new(railway),
            stations,
        }
    }
}
