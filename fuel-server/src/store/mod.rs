//! Fuel station storage.
//!
//! The optimizer sees stations only through `StationStore`: a radius query
//! ordered by price then distance, plus get/upsert by OPIS id. The bundled
//! implementation keeps stations in memory and persists them to a JSON
//! snapshot written by the CSV import.

mod error;
mod import;
mod memory;
mod snapshot;

use std::future::Future;

use crate::domain::{FuelStation, LonLat, OpisId, Station};

pub use error::StoreError;
pub use import::{ImportOptions, ImportSummary, StationRecord, import_stations};
pub use memory::MemoryStationStore;
pub use snapshot::{StationSnapshot, StationSnapshotConfig};

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Station lookup and persistence.
pub trait StationStore: Send + Sync {
    /// Stations within `radius_miles` of `center`, cheapest first, then
    /// nearest first. At most `limit` results; an empty list is not an error.
    fn find_within_radius(
        &self,
        center: LonLat,
        radius_miles: f64,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<FuelStation>, StoreError>> + Send;

    /// Look up a station by OPIS id.
    fn get(&self, id: OpisId) -> impl Future<Output = Result<Option<Station>, StoreError>> + Send;

    /// Insert or replace a station, keyed by OPIS id.
    fn upsert(&self, station: Station) -> impl Future<Output = Result<Upsert, StoreError>> + Send;
}
