use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use fuel_server::config::AppConfig;
use fuel_server::store::{MemoryStationStore, StationSnapshot};
use fuel_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("failed to read configuration")?;

    // Load stations written by import-stations
    let snapshot = StationSnapshot::new(config.snapshot.clone());
    let stations = snapshot
        .load()
        .with_context(|| format!("failed to load stations from {}", snapshot.path().display()))?;
    if stations.is_empty() {
        warn!(
            path = %snapshot.path().display(),
            "no stations loaded; run import-stations first"
        );
    }
    let store = MemoryStationStore::from_stations(stations);
    info!(stations = store.len().await, "station store ready");

    let state = AppState::from_config(&config, store).context("failed to create MapQuest client")?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "fuel route planner listening");
    info!("  GET  /health              - Health check");
    info!("  POST /api/optimize-route  - Plan fuel stops between two addresses");
    info!("  GET  /api/stations/:id    - Station details");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
