//! External provider seams.
//!
//! The planner talks to geocoding and directions services only through these
//! traits, so tests can swap in counting mocks and the HTTP adapter stays a
//! detail of `mapquest`.

use std::future::Future;

use crate::domain::{LonLat, Route};

pub use crate::mapquest::ProviderError;

/// Resolves a free-text address to a position.
pub trait Geocoder: Send + Sync {
    /// Geocode an address. Fails with `ProviderError::NoResults` when the
    /// provider knows nothing about it.
    fn geocode(&self, address: &str)
    -> impl Future<Output = Result<LonLat, ProviderError>> + Send;
}

/// Fetches driving routes between two positions.
pub trait DirectionsProvider: Send + Sync {
    /// Get the driving route from `from` to `to`.
    ///
    /// Never returns an empty polyline: a provider failure is an error, not
    /// an empty route.
    fn route(
        &self,
        from: LonLat,
        to: LonLat,
    ) -> impl Future<Output = Result<Route, ProviderError>> + Send;
}
