//! Driving routes returned by the directions provider.

use serde::{Deserialize, Serialize};

use super::LonLat;

/// A driving route: polyline plus total distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Polyline points, longitude first.
    pub points: Vec<LonLat>,

    /// Total driving distance in miles.
    pub distance_miles: f64,
}

impl Route {
    /// Create a route.
    pub fn new(points: Vec<LonLat>, distance_miles: f64) -> Self {
        Self {
            points,
            distance_miles,
        }
    }
}

/// Index of the `i`-th of `n` evenly spaced samples over `len` points.
///
/// Always `< len` for `i < n` and `len > 0`.
pub fn sample_index(i: usize, n: usize, len: usize) -> usize {
    (i * len) / n
}
