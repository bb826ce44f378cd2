//! Fuel-stop selection along a route.

use futures::future::join_all;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use crate::domain::{DomainError, FuelStation, LonLat, sample_index};
use crate::store::StationStore;

use super::config::OptimizerConfig;
use super::error::PlanError;

/// Upper bound on route segments; longer trips are rejected as invalid.
const MAX_SEGMENTS: usize = 10_000;

/// Chosen stops, in route order, and what the fuel will cost.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    pub fuel_stops: Vec<FuelStation>,
    pub total_fuel_cost: f64,
}

impl OptimizationResult {
    /// No stops, nothing spent.
    pub fn empty() -> Self {
        Self {
            fuel_stops: Vec::new(),
            total_fuel_cost: 0.0,
        }
    }
}

/// Cost of driving `distance` miles at `miles_per_gallon` with fuel at `price`.
pub fn fuel_cost(distance: f64, miles_per_gallon: f64, price: Decimal) -> f64 {
    // Decimal always converts; precision loss past f64 is irrelevant for cost
    let price = price.to_f64().unwrap_or_default();
    distance / miles_per_gallon * price
}

/// Selects fuel stops from a `StationStore`.
pub struct RouteOptimizer<S> {
    store: S,
    config: OptimizerConfig,
}

impl<S: StationStore> RouteOptimizer<S> {
    /// Create an optimizer. `config` is assumed to pass `validate`.
    pub fn new(store: S, config: OptimizerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stations within `radius_miles` of `point`, cheapest then nearest.
    pub async fn find_nearby_stations(
        &self,
        point: LonLat,
        radius_miles: f64,
    ) -> Result<Vec<FuelStation>, PlanError> {
        let stations = self
            .store
            .find_within_radius(point, radius_miles, self.config.max_stations_per_query)
            .await?;
        Ok(stations)
    }

    /// Pick fuel stops for a route of `total_distance` miles.
    ///
    /// A trip within one tank gets at most one stop, near the start. A longer
    /// trip is split into `floor(d / range) + 1` equal segments and the
    /// cheapest station near each segment's sample point is taken, skipping a
    /// sample whose cheapest station repeats the previous stop. Sample points
    /// with no station nearby are skipped too.
    pub async fn optimize_fuel_stops(
        &self,
        route: &[LonLat],
        total_distance: f64,
    ) -> Result<OptimizationResult, PlanError> {
        let Some(&start) = route.first() else {
            return Err(DomainError::EmptyRoute.into());
        };
        if !total_distance.is_finite()
            || total_distance < 0.0
            || (total_distance / self.config.max_range).floor() >= MAX_SEGMENTS as f64
        {
            return Err(DomainError::InvalidDistance(total_distance).into());
        }

        let mpg = self.config.miles_per_gallon;

        if total_distance <= self.config.max_range {
            let stations = self
                .find_nearby_stations(start, self.config.search_radius_miles)
                .await?;

            let Some(cheapest) = stations.into_iter().next() else {
                debug!(total_distance, "no station near route start");
                return Ok(OptimizationResult::empty());
            };

            let total_fuel_cost = fuel_cost(total_distance, mpg, cheapest.price);
            debug!(total_distance, station = cheapest.id, total_fuel_cost, "single stop");

            return Ok(OptimizationResult {
                fuel_stops: vec![cheapest],
                total_fuel_cost,
            });
        }

        // Guarded above: total_distance is finite, > max_range > 0, and under MAX_SEGMENTS tanks
        let num_stops = (total_distance / self.config.max_range).floor() as usize + 1;
        let segment_length = total_distance / num_stops as f64;

        let samples: Vec<LonLat> = (0..num_stops)
            .map(|i| route[sample_index(i, num_stops, route.len())])
            .collect();

        debug!(
            total_distance,
            num_stops,
            segment_length,
            points = route.len(),
            "sampling route for fuel stops"
        );

        // Batched lookups; results stay in sample order
        let mut nearby: Vec<Vec<FuelStation>> = Vec::with_capacity(samples.len());
        for batch in samples.chunks(self.config.lookup_concurrency.max(1)) {
            let results = join_all(
                batch
                    .iter()
                    .map(|&point| self.find_nearby_stations(point, self.config.search_radius_miles)),
            )
            .await;

            for result in results {
                nearby.push(result?);
            }
        }

        let mut result = OptimizationResult::empty();

        for (i, stations) in nearby.into_iter().enumerate() {
            let Some(cheapest) = stations.into_iter().next() else {
                debug!(sample = i, "no station near sample point");
                continue;
            };

            if result
                .fuel_stops
                .last()
                .is_some_and(|prev| prev.id == cheapest.id)
            {
                debug!(sample = i, station = cheapest.id, "same station as previous stop");
                continue;
            }

            result.total_fuel_cost += fuel_cost(segment_length, mpg, cheapest.price);
            result.fuel_stops.push(cheapest);
        }

        debug!(
            stops = result.fuel_stops.len(),
            total_fuel_cost = result.total_fuel_cost,
            "fuel stops selected"
        );

        Ok(result)
    }
}
