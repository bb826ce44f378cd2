//! Data transfer objects for web requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{FuelStation, LonLat, OpisId, Station};
use crate::planner::RoutePlan;

/// Round to cents / hundredths of a mile for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Request to plan fuel stops between two addresses.
#[derive(Debug, Deserialize)]
pub struct OptimizeRouteRequest {
    /// Starting address
    #[serde(default)]
    pub start: String,

    /// Destination address
    #[serde(default)]
    pub end: String,
}

/// A planned trip.
#[derive(Debug, Serialize)]
pub struct OptimizeRouteResponse {
    /// Route polyline as `[lon, lat]` pairs
    pub route: Vec<LonLat>,

    /// Total driving distance in miles, 2 decimals
    pub total_distance: f64,

    /// Fuel stops in route order
    pub fuel_stops: Vec<FuelStopResult>,

    /// Estimated fuel spend, 2 decimals
    pub total_fuel_cost: f64,
}

impl OptimizeRouteResponse {
    pub fn from_plan(plan: RoutePlan) -> Self {
        Self {
            route: plan.route.points,
            total_distance: round2(plan.total_distance),
            fuel_stops: plan.fuel_stops.iter().map(FuelStopResult::from_station).collect(),
            total_fuel_cost: round2(plan.total_fuel_cost),
        }
    }
}

/// A fuel stop on a planned route.
#[derive(Debug, Serialize)]
pub struct FuelStopResult {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,

    /// Price per gallon
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// `[lon, lat]`
    pub location: LonLat,
}

impl FuelStopResult {
    pub fn from_station(station: &FuelStation) -> Self {
        Self {
            name: station.name.clone(),
            address: station.address.clone(),
            city: station.city.clone(),
            state: station.state.to_string(),
            price: station.price,
            location: station.location,
        }
    }
}

/// Full details of one station.
#[derive(Debug, Serialize)]
pub struct StationDetailsResponse {
    pub id: OpisId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    pub location: LocationResult,
}

impl StationDetailsResponse {
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.opis_id,
            name: station.name.clone(),
            address: station.address.clone(),
            city: station.city.clone(),
            state: station.state.to_string(),
            price: station.price,
            location: LocationResult {
                latitude: station.location.lat,
                longitude: station.location.lon,
            },
        }
    }
}

/// Named-field location for station details.
#[derive(Debug, Serialize)]
pub struct LocationResult {
    pub latitude: f64,
    pub longitude: f64,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
