//! In-memory station store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{FuelStation, LonLat, OpisId, Station};

use super::error::StoreError;
use super::{StationStore, Upsert};

/// Thread-safe station store held in memory.
///
/// Cloning is cheap and clones share the same stations. Radius queries scan
/// every station; a few thousand truck stops is well within reach of that.
#[derive(Clone, Default)]
pub struct MemoryStationStore {
    inner: Arc<RwLock<HashMap<OpisId, Station>>>,
}

impl MemoryStationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given stations. Later duplicates win.
    pub fn from_stations(stations: Vec<Station>) -> Self {
        let map = stations.into_iter().map(|s| (s.opis_id, s)).collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Number of stations in the store.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// All stations ordered by OPIS id.
    pub async fn all(&self) -> Vec<Station> {
        let guard = self.inner.read().await;
        let mut stations: Vec<Station> = guard.values().cloned().collect();
        stations.sort_by_key(|s| s.opis_id);
        stations
    }
}

impl StationStore for MemoryStationStore {
    async fn find_within_radius(
        &self,
        center: LonLat,
        radius_miles: f64,
        limit: usize,
    ) -> Result<Vec<FuelStation>, StoreError> {
        if !radius_miles.is_finite() || radius_miles < 0.0 {
            return Err(StoreError::InvalidRadius(radius_miles));
        }

        let guard = self.inner.read().await;

        let mut candidates: Vec<(&Station, f64)> = guard
            .values()
            .filter(|s| !s.needs_geocoding())
            .map(|s| (s, s.location.distance_miles(&center)))
            .filter(|(_, distance)| *distance <= radius_miles)
            .collect();

        candidates.sort_by(|(a, da), (b, db)| {
            a.price
                .cmp(&b.price)
                .then(da.total_cmp(db))
                .then(a.opis_id.cmp(&b.opis_id))
        });

        Ok(candidates
            .into_iter()
            .take(limit)
            .map(|(s, _)| s.to_fuel_station())
            .collect())
    }

    async fn get(&self, id: OpisId) -> Result<Option<Station>, StoreError> {
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn upsert(&self, station: Station) -> Result<Upsert, StoreError> {
        let mut guard = self.inner.write().await;
        match guard.insert(station.opis_id, station) {
            Some(_) => Ok(Upsert::Updated),
            None => Ok(Upsert::Inserted),
        }
    }
}
