//! Greedy fuel-stop optimizer.
//!
//! Given a route polyline and its length, picks the cheapest nearby station
//! at evenly spaced sample points so that no leg exceeds the vehicle's range.
//! There is no road-network modelling here: stations are matched to sample
//! points by straight-line (haversine) distance.

mod config;
mod error;
mod optimize;


pub use config::OptimizerConfig;
pub use error::PlanError;
pub use optimize::{OptimizationResult, RouteOptimizer, fuel_cost};
