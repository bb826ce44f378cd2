//! Planning service: validate, geocode, route, optimize.

use tracing::{debug, info, warn};

use crate::cache::{ResultCache, route_key};
use crate::domain::{FuelStation, OpisId, Route, Station};
use crate::optimizer::{PlanError, RouteOptimizer};
use crate::provider::{DirectionsProvider, Geocoder};
use crate::store::StationStore;

use super::config::PlannerConfig;

/// A planned trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    /// The driving route, longitude first.
    pub route: Route,

    /// Total driving distance in miles.
    pub total_distance: f64,

    /// Fuel stops in route order.
    pub fuel_stops: Vec<FuelStation>,

    /// Estimated fuel spend for the trip.
    pub total_fuel_cost: f64,
}

/// Plans fuel stops between two addresses.
///
/// Every collaborator is injected: the geocoder (usually a
/// `CachedGeocoder`), the directions provider, the optimizer with its
/// station store, and the route cache.
pub struct RoutePlanner<G, D, S, C> {
    geocoder: G,
    directions: D,
    optimizer: RouteOptimizer<S>,
    route_cache: C,
    config: PlannerConfig,
}

impl<G, D, S, C> RoutePlanner<G, D, S, C>
where
    G: Geocoder,
    D: DirectionsProvider,
    S: StationStore,
    C: ResultCache<Route>,
{
    pub fn new(
        geocoder: G,
        directions: D,
        optimizer: RouteOptimizer<S>,
        route_cache: C,
        config: PlannerConfig,
    ) -> Self {
        Self {
            geocoder,
            directions,
            optimizer,
            route_cache,
            config,
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn directions(&self) -> &D {
        &self.directions
    }

    pub fn optimizer(&self) -> &RouteOptimizer<S> {
        &self.optimizer
    }

    /// Plan a trip from `start` to `end`.
    ///
    /// Fails with `InvalidRequest` for blank addresses and `Timeout` if the
    /// whole plan takes longer than the configured deadline. Pending provider
    /// calls are dropped on timeout.
    pub async fn plan(&self, start: &str, end: &str) -> Result<RoutePlan, PlanError> {
        let start = start.trim();
        let end = end.trim();

        if start.is_empty() || end.is_empty() {
            return Err(PlanError::InvalidRequest(
                "start and end addresses are required".to_string(),
            ));
        }

        match tokio::time::timeout(self.config.request_timeout, self.plan_route(start, end)).await
        {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    start,
                    end,
                    timeout = ?self.config.request_timeout,
                    "route planning timed out"
                );
                Err(PlanError::Timeout)
            }
        }
    }

    async fn plan_route(&self, start: &str, end: &str) -> Result<RoutePlan, PlanError> {
        let route = self.fetch_route(start, end).await?;

        let optimized = self
            .optimizer
            .optimize_fuel_stops(&route.points, route.distance_miles)
            .await?;

        info!(
            start,
            end,
            distance = route.distance_miles,
            stops = optimized.fuel_stops.len(),
            cost = optimized.total_fuel_cost,
            "route planned"
        );

        Ok(RoutePlan {
            total_distance: route.distance_miles,
            fuel_stops: optimized.fuel_stops,
            total_fuel_cost: optimized.total_fuel_cost,
            route,
        })
    }

    /// Driving route between two addresses, from cache when possible.
    ///
    /// A cache hit makes no provider calls at all. Failures are not cached.
    pub async fn fetch_route(&self, start: &str, end: &str) -> Result<Route, PlanError> {
        let key = route_key(start, end);

        if let Some(route) = self.route_cache.get(&key).await {
            debug!(start, end, "route cache hit");
            return Ok(route);
        }

        let (from, to) = tokio::join!(self.geocoder.geocode(start), self.geocoder.geocode(end));
        let (from, to) = (from?, to?);
        debug!(start, end, ?from, ?to, "geocoded route endpoints");

        let route = self.directions.route(from, to).await?;

        self.route_cache
            .set(key, route.clone(), self.config.cache_ttl)
            .await;

        Ok(route)
    }

    /// Look up a station, geocoding it first if it has no location yet.
    ///
    /// A successful geocode is written back to the store. A failed one is
    /// logged and the station is returned with its sentinel location.
    pub async fn station_details(&self, id: OpisId) -> Result<Option<Station>, PlanError> {
        let store = self.optimizer.store();

        let Some(mut station) = store.get(id).await? else {
            return Ok(None);
        };

        if station.needs_geocoding() {
            let address = station.geocode_query();
            match self.geocoder.geocode(&address).await {
                Ok(location) => {
                    station.location = location;
                    store.upsert(station.clone()).await?;
                    debug!(id, %address, ?location, "geocoded station on demand");
                }
                Err(e) => {
                    warn!(id, %address, error = %e, "could not geocode station");
                }
            }
        }

        Ok(Some(station))
    }
}
