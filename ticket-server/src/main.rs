use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use ticket_server::cache::{CacheConfig, CachedRailwayClient};
use ticket_server::railway::{RailwayClient, RailwayConfig};
use ticket_server::stations::{
    StationCache, StationCacheConfig, StationCatalog, StationClient, StationClientConfig,
};
use ticket_server::web::{AppState, create_router};

/// How often to refresh the station dataset (24 hours).
const STATION_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Base URL override, for pointing at a stub upstream in development
    let mut railway_config = RailwayConfig::new();
    let mut station_config = StationClientConfig::new();
    if let Ok(url) = std::env::var("RAILWAY_BASE_URL") {
        railway_config = railway_config.with_base_url(url.clone());
        station_config = station_config.with_base_url(url);
    }

    // Create railway client with query cache
    let railway_client =
        RailwayClient::new(railway_config).expect("Failed to create railway client");
    let cached_railway = CachedRailwayClient::new(railway_client, &CacheConfig::default());

    // Load station dataset (disk cache first, fail fast if unavailable)
    println!("Loading station dataset...");
    let station_client =
        StationClient::new(station_config).expect("Failed to create station client");
    let disk_cache = StationCache::new(StationCacheConfig::default());
    let stations = StationCatalog::load(station_client, Some(disk_cache))
        .await
        .expect("Failed to load station dataset");
    println!("Loaded {} stations", stations.len().await);

    // Spawn background task to refresh the station dataset daily
    let stations_refresh = stations.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(STATION_REFRESH_INTERVAL);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match stations_refresh.refresh().await {
                Ok(count) => println!("Refreshed station dataset: {} stations", count),
                Err(e) => eprintln!("Failed to refresh station dataset: {}", e),
            }
        }
    });

    // Build app state and router
    let state = AppState::new(cached_railway, stations);
    let app = create_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    println!("Left-ticket query server listening on http://{addr}");
    println!();
    println!("API Endpoints:");
    println!("  GET /health               - Health check");
    println!("  GET /api/current-date     - Today in the railway time zone");
    println!("  GET /api/tickets          - Query tickets (date, fromStation, toStation[, trainFilterFlags])");
    println!("  GET /api/stations/search  - Station keyword search");
    println!("  GET /api/stations/in-city - Stations in a city");
    println!("  GET /api/stations/by-name - Station by exact name");
    println!("  GET /api/stations/by-code - Station by telecode");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
