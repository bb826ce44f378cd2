//! Route planning.
//!
//! Answers "where should I refuel between A and B?": geocode both addresses,
//! fetch a driving route, then hand the polyline to the fuel-stop optimizer.
//! Routes are cached by address pair and the whole request runs under a
//! deadline.

mod config;
mod service;

#[cfg(test)]
mod service_tests;

pub use config::PlannerConfig;
pub use service::{RoutePlan, RoutePlanner};
