//! Geographic coordinates.
//!
//! All coordinates in this crate are WGS84 (SRID 4326) and ordered
//! longitude first. Providers that speak latitude-first are converted at
//! their adapter boundary, never anywhere else.

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Metres in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// A WGS84 position, serialized as `[lon, lat]`.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::LonLat;
///
/// let houston = LonLat::new(-95.3698, 29.7604);
/// assert_eq!(serde_json::to_string(&houston).unwrap(), "[-95.3698,29.7604]");
///
/// // (0, 0) is the "not geocoded yet" sentinel
/// assert!(LonLat::UNKNOWN.is_unknown());
/// assert!(!houston.is_unknown());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    /// Sentinel for a location that has not been geocoded.
    pub const UNKNOWN: LonLat = LonLat { lon: 0.0, lat: 0.0 };

    /// Create a position from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Create a position from a latitude-first pair.
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self { lon, lat }
    }

    /// True for the (0, 0) "needs geocoding" sentinel.
    pub fn is_unknown(&self) -> bool {
        self.lon == 0.0 && self.lat == 0.0
    }

    /// True if both components are finite and within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }

    /// Great-circle distance to another position, in miles.
    pub fn distance_miles(&self, other: &LonLat) -> f64 {
        Point::from(*self).haversine_distance(&Point::from(*other)) / METERS_PER_MILE
    }
}

impl From<[f64; 2]> for LonLat {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<LonLat> for [f64; 2] {
    fn from(value: LonLat) -> Self {
        [value.lon, value.lat]
    }
}

impl From<LonLat> for Point<f64> {
    fn from(value: LonLat) -> Self {
        Point::new(value.lon, value.lat)
    }
}
