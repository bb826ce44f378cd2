//! MapQuest geocoding and directions client.
//!
//! Key characteristics of MapQuest:
//! - Failures are reported in `info.statuscode`, often with HTTP 200
//! - Coordinates are latitude-first (`latLng` objects, flat `shapePoints`)
//! - Route shapes are only returned when `fullShape=true`

mod client;
mod convert;
mod error;
mod types;

pub use client::{DEFAULT_BASE_URL, MapQuestClient, MapQuestConfig};
pub use convert::{convert_geocode, convert_route, shape_to_points};
pub use error::ProviderError;
pub use types::{DirectionsResponse, GeocodeResponse, Info, LatLng};
