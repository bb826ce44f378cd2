//! Conversion from MapQuest DTOs to domain types.
//!
//! MapQuest speaks latitude-first; everything returned from here is
//! longitude-first.

use crate::domain::{LonLat, Route};

use super::error::ProviderError;
use super::types::{DirectionsResponse, GeocodeResponse, Info};

/// Fail on any non-zero MapQuest status code.
fn check_status(info: &Info) -> Result<(), ProviderError> {
    if info.statuscode != 0 {
        return Err(ProviderError::Status {
            code: info.statuscode,
            messages: info.messages.clone(),
        });
    }
    Ok(())
}

/// Convert a directions response into a route.
pub fn convert_route(resp: &DirectionsResponse) -> Result<Route, ProviderError> {
    check_status(&resp.info)?;

    let route = resp
        .route
        .as_ref()
        .ok_or_else(|| ProviderError::Malformed("missing route".to_string()))?;

    let distance = route
        .distance
        .ok_or_else(|| ProviderError::Malformed("missing route distance".to_string()))?;
    if !distance.is_finite() || distance < 0.0 {
        return Err(ProviderError::Malformed(format!(
            "invalid route distance {distance}"
        )));
    }

    let shape = route
        .shape
        .as_ref()
        .ok_or_else(|| ProviderError::Malformed("missing route shape".to_string()))?;

    let points = shape_to_points(&shape.shape_points)?;
    if points.is_empty() {
        return Err(ProviderError::Malformed("empty route shape".to_string()));
    }

    Ok(Route::new(points, distance))
}

/// Convert a flat `[lat, lng, ...]` shape array to positions.
pub fn shape_to_points(shape_points: &[f64]) -> Result<Vec<LonLat>, ProviderError> {
    if shape_points.len() % 2 != 0 {
        return Err(ProviderError::Malformed(format!(
            "shape has odd number of values ({})",
            shape_points.len()
        )));
    }

    shape_points
        .chunks_exact(2)
        .map(|pair| {
            let point = LonLat::from_lat_lon(pair[0], pair[1]);
            if point.is_valid() {
                Ok(point)
            } else {
                Err(ProviderError::Malformed(format!(
                    "shape point out of range: lat {}, lng {}",
                    pair[0], pair[1]
                )))
            }
        })
        .collect()
}

/// Convert a geocoding response into the best matching position.
pub fn convert_geocode(resp: &GeocodeResponse, address: &str) -> Result<LonLat, ProviderError> {
    check_status(&resp.info)?;

    let location = resp
        .results
        .first()
        .and_then(|r| r.locations.first())
        .ok_or_else(|| ProviderError::NoResults(address.to_string()))?;

    let point = LonLat::from_lat_lon(location.lat_lng.lat, location.lat_lng.lng);
    if !point.is_valid() {
        return Err(ProviderError::Malformed(format!(
            "geocode result out of range for {address:?}"
        )));
    }
    if point.is_unknown() {
        // MapQuest answers (0, 0) rather than an empty list for some inputs.
        return Err(ProviderError::NoResults(address.to_string()));
    }

    Ok(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directions(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).unwrap()
    }

    fn geocode(json: &str) -> GeocodeResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn route_points_are_longitude_first() {
        let resp = directions(
            r#"{"info":{"statuscode":0},"route":{"distance":1000,
                "shape":{"shapePoints":[29.456,-95.123,29.567,-95.234]}}}"#,
        );
        let route = convert_route(&resp).unwrap();
        assert_eq!(route.distance_miles, 1000.0);
        assert_eq!(
            route.points,
            vec![LonLat::new(-95.123, 29.456), LonLat::new(-95.234, 29.567)]
        );
    }

    #[test]
    fn non_zero_status_is_an_error() {
        let resp = directions(
            r#"{"info":{"statuscode":402,"messages":["Unable to route"]},
                "route":{"distance":0,"shape":{"shapePoints":[1.0,2.0]}}}"#,
        );
        match convert_route(&resp) {
            Err(ProviderError::Status { code, messages }) => {
                assert_eq!(code, 402);
                assert_eq!(messages, vec!["Unable to route".to_string()]);
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn missing_shape_is_malformed() {
        let resp = directions(r#"{"info":{"statuscode":0},"route":{"distance":12.5}}"#);
        assert!(convert_route(&resp).unwrap_err().is_malformed());
    }

    #[test]
    fn empty_shape_is_malformed() {
        let resp = directions(
            r#"{"info":{"statuscode":0},"route":{"distance":12.5,"shape":{"shapePoints":[]}}}"#,
        );
        assert!(convert_route(&resp).unwrap_err().is_malformed());
    }

    #[test]
    fn odd_shape_is_malformed() {
        let err = shape_to_points(&[29.0, -95.0, 30.0]).unwrap_err();
        assert!(err.to_string().contains("odd number"));
    }

    #[test]
    fn out_of_range_shape_point_is_malformed() {
        // Longitude-first input mistaken for latitude-first: lat -95 is impossible
        assert!(shape_to_points(&[-95.123, 29.456]).is_err());
    }

    #[test]
    fn geocode_takes_first_location() {
        let resp = geocode(
            r#"{"info":{"statuscode":0},"results":[{"locations":[
                {"latLng":{"lat":29.76,"lng":-95.37}},
                {"latLng":{"lat":32.78,"lng":-96.80}}]}]}"#,
        );
        assert_eq!(
            convert_geocode(&resp, "Houston, TX").unwrap(),
            LonLat::new(-95.37, 29.76)
        );
    }

    #[test]
    fn geocode_without_locations_is_no_results() {
        let resp = geocode(r#"{"info":{"statuscode":0},"results":[{"locations":[]}]}"#);
        assert!(matches!(
            convert_geocode(&resp, "Atlantis"),
            Err(ProviderError::NoResults(addr)) if addr == "Atlantis"
        ));
    }

    #[test]
    fn geocode_sentinel_is_no_results() {
        let resp = geocode(
            r#"{"info":{"statuscode":0},"results":[{"locations":[{"latLng":{"lat":0,"lng":0}}]}]}"#,
        );
        assert!(convert_geocode(&resp, "x").unwrap_err().is_not_found());
    }

    #[test]
    fn geocode_bad_status() {
        let resp = geocode(r#"{"info":{"statuscode":403,"messages":["bad key"]}}"#);
        assert!(matches!(
            convert_geocode(&resp, "x"),
            Err(ProviderError::Status { code: 403, .. })
        ));
        // A rejected key is our configuration, not the caller's address
        assert!(!convert_geocode(&resp, "x").unwrap_err().is_not_found());
    }
}
