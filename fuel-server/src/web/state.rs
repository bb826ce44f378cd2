//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CachedGeocoder, MokaResultCache};
use crate::config::AppConfig;
use crate::domain::{LonLat, Route};
use crate::mapquest::{MapQuestClient, ProviderError};
use crate::optimizer::RouteOptimizer;
use crate::planner::RoutePlanner;
use crate::store::MemoryStationStore;

/// The planner as wired for serving: MapQuest behind moka caches, stations
/// in memory.
pub type LivePlanner = RoutePlanner<
    CachedGeocoder<MapQuestClient, MokaResultCache<LonLat>>,
    MapQuestClient,
    MemoryStationStore,
    MokaResultCache<Route>,
>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Route planner, including the station store
    pub planner: Arc<LivePlanner>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(planner: LivePlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }

    /// Wire up the live planner from configuration.
    pub fn from_config(config: &AppConfig, store: MemoryStationStore) -> Result<Self, ProviderError> {
        let client = MapQuestClient::new(config.mapquest.clone())?;

        let geocoder = CachedGeocoder::new(
            client.clone(),
            MokaResultCache::new(&config.cache),
            config.cache.ttl,
        );

        let planner = RoutePlanner::new(
            geocoder,
            client,
            RouteOptimizer::new(store, config.optimizer.clone()),
            MokaResultCache::new(&config.cache),
            config.planner.clone(),
        );

        Ok(Self::new(planner))
    }
}
