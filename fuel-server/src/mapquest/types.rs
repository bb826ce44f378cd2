//! MapQuest API response DTOs.
//!
//! These types map directly to the MapQuest JSON responses. Fields MapQuest
//! omits on failure (`route`, `results`) are optional here and checked in
//! `convert`, so a failed call never reaches the optimizer half-parsed.

use serde::Deserialize;

/// Status block present on every MapQuest response.
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    /// 0 on success. Anything else is a failure, whatever the HTTP status.
    pub statuscode: i32,

    /// Human-readable failure reasons.
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Response from `directions/v2/route`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    pub info: Info,

    /// Absent or partial when `info.statuscode != 0`.
    pub route: Option<RouteDto>,
}

/// The route body of a directions response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDto {
    /// Total distance, in the requested unit (miles).
    pub distance: Option<f64>,

    /// Route polyline; only present when `fullShape` was requested.
    pub shape: Option<ShapeDto>,
}

/// Route polyline.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDto {
    /// Flat `[lat, lng, lat, lng, ...]` array.
    pub shape_points: Vec<f64>,
}

/// Response from `geocoding/v1/address`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub info: Info,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

/// One result per provided location.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub locations: Vec<GeocodeLocation>,
}

/// A candidate match for an address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeLocation {
    pub lat_lng: LatLng,

    /// Match granularity code, e.g. "L1AAA" or "A5XAX".
    pub geocode_quality_code: Option<String>,
}

/// Latitude-first coordinate object.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_failure_without_route() {
        let json = r#"{"info":{"statuscode":402,"messages":["We are unable to route with the given locations."]}}"#;
        let resp: DirectionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.info.statuscode, 402);
        assert_eq!(resp.info.messages.len(), 1);
        assert!(resp.route.is_none());
    }

    #[test]
    fn directions_with_shape() {
        let json = r#"{
            "info": {"statuscode": 0, "messages": []},
            "route": {"distance": 239.5, "shape": {"shapePoints": [29.456, -95.123, 29.567, -95.234]}}
        }"#;
        let resp: DirectionsResponse = serde_json::from_str(json).unwrap();
        let route = resp.route.unwrap();
        assert_eq!(route.distance, Some(239.5));
        assert_eq!(route.shape.unwrap().shape_points.len(), 4);
    }

    #[test]
    fn geocode_response() {
        let json = r#"{
            "info": {"statuscode": 0},
            "results": [{"locations": [{"latLng": {"lat": 29.76, "lng": -95.37}, "geocodeQualityCode": "A5XAX"}]}]
        }"#;
        let resp: GeocodeResponse = serde_json::from_str(json).unwrap();
        let loc = &resp.results[0].locations[0];
        assert_eq!(loc.lat_lng.lat, 29.76);
        assert_eq!(loc.lat_lng.lng, -95.37);
        assert_eq!(loc.geocode_quality_code.as_deref(), Some("A5XAX"));
    }

    #[test]
    fn missing_info_is_rejected() {
        let json = r#"{"route": {"distance": 1.0}}"#;
        assert!(serde_json::from_str::<DirectionsResponse>(json).is_err());
    }
}
