//! Unit tests for the planning service.

use super::*;
use crate::cache::{CacheConfig, CachedGeocoder, MokaResultCache};
use crate::domain::{LonLat, OpisId, Route, StateCode, Station};
use crate::optimizer::{OptimizerConfig, PlanError, RouteOptimizer};
use crate::provider::{DirectionsProvider, Geocoder, ProviderError};
use crate::store::{MemoryStationStore, StationStore};

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;

const HOUSTON: LonLat = LonLat {
    lon: -95.3698,
    lat: 29.7604,
};
const DALLAS: LonLat = LonLat {
    lon: -96.7970,
    lat: 32.7767,
};

/// Mock geocoder answering from a table and counting calls.
struct MockGeocoder {
    places: HashMap<String, LonLat>,
    call_count: Mutex<usize>,
}

impl MockGeocoder {
    fn new() -> Self {
        let mut places = HashMap::new();
        places.insert("Houston, TX".to_string(), HOUSTON);
        places.insert("Dallas, TX".to_string(), DALLAS);
        places.insert("1 Test St, TestCity, TX".to_string(), HOUSTON);
        Self {
            places,
            call_count: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Geocoder for MockGeocoder {
    async fn geocode(&self, address: &str) -> Result<LonLat, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        self.places
            .get(address)
            .copied()
            .ok_or_else(|| ProviderError::NoResults(address.to_string()))
    }
}

/// Mock directions provider returning a straight line between endpoints.
struct MockDirections {
    distance_miles: f64,
    delay: Duration,
    fail_with_status: Option<i32>,
    call_count: Mutex<usize>,
}

impl MockDirections {
    fn new(distance_miles: f64) -> Self {
        Self {
            distance_miles,
            delay: Duration::ZERO,
            fail_with_status: None,
            call_count: Mutex::new(0),
        }
    }

    fn calls(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl DirectionsProvider for MockDirections {
    async fn route(&self, from: LonLat, to: LonLat) -> Result<Route, ProviderError> {
        *self.call_count.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(code) = self.fail_with_status {
            return Err(ProviderError::Status {
                code,
                messages: vec!["unable to calculate route".to_string()],
            });
        }
        let points = (0..=20)
            .map(|i| {
                let t = i as f64 / 20.0;
                LonLat::new(
                    from.lon + (to.lon - from.lon) * t,
                    from.lat + (to.lat - from.lat) * t,
                )
            })
            .collect();
        Ok(Route::new(points, self.distance_miles))
    }
}

fn station(id: OpisId, price: &str, location: LonLat) -> Station {
    Station {
        opis_id: id,
        name: format!("Station {id}"),
        address: format!("{id} Test St"),
        city: "TestCity".to_string(),
        state: StateCode::parse("TX").unwrap(),
        rack_id: id,
        price: Decimal::from_str(price).unwrap(),
        location,
    }
}

type TestPlanner =
    RoutePlanner<MockGeocoder, MockDirections, MemoryStationStore, MokaResultCache<Route>>;

fn planner_with(directions: MockDirections, stations: Vec<Station>, config: PlannerConfig) -> TestPlanner {
    RoutePlanner::new(
        MockGeocoder::new(),
        directions,
        RouteOptimizer::new(
            MemoryStationStore::from_stations(stations),
            OptimizerConfig::default(),
        ),
        MokaResultCache::new(&CacheConfig::default()),
        config,
    )
}

fn planner(distance_miles: f64) -> TestPlanner {
    planner_with(
        MockDirections::new(distance_miles),
        vec![
            station(1, "3.25", HOUSTON),
            station(2, "3.10", DALLAS),
        ],
        PlannerConfig::default(),
    )
}

#[tokio::test]
async fn plans_short_trip() {
    let planner = planner(240.0);

    let plan = planner.plan("Houston, TX", "Dallas, TX").await.unwrap();

    assert_eq!(plan.total_distance, 240.0);
    assert_eq!(plan.route.points.first(), Some(&HOUSTON));
    assert_eq!(plan.fuel_stops.len(), 1);
    assert_eq!(plan.fuel_stops[0].id, 1);
    assert!((plan.total_fuel_cost - 240.0 / 10.0 * 3.25).abs() < 1e-9);
}

#[tokio::test]
async fn plans_long_trip_in_route_order() {
    let planner = planner(1250.0);

    let plan = planner.plan("Houston, TX", "Dallas, TX").await.unwrap();

    let ids: Vec<_> = plan.fuel_stops.iter().map(|s| s.id).collect();
    assert_eq!(ids.first(), Some(&1));
    assert!(ids.len() <= 3);
    assert!(plan.total_fuel_cost > 0.0);
}

#[tokio::test]
async fn second_identical_request_uses_cache() {
    let planner = planner(240.0);

    let first = planner.plan("Houston, TX", "Dallas, TX").await.unwrap();
    let geocodes = planner.geocoder().calls();
    let routes = planner.directions().calls();
    assert_eq!(geocodes, 2);
    assert_eq!(routes, 1);

    let second = planner.plan("Houston, TX", "Dallas, TX").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(planner.geocoder().calls(), geocodes);
    assert_eq!(planner.directions().calls(), routes);
}

#[tokio::test]
async fn surrounding_whitespace_shares_cache_entry() {
    let planner = planner(240.0);

    planner.plan("Houston, TX", "Dallas, TX").await.unwrap();
    planner.plan("  Houston, TX", "Dallas, TX  ").await.unwrap();

    assert_eq!(planner.directions().calls(), 1);
}

#[tokio::test]
async fn reversed_trip_is_a_different_route() {
    let planner = planner(240.0);

    planner.plan("Houston, TX", "Dallas, TX").await.unwrap();
    let back = planner.plan("Dallas, TX", "Houston, TX").await.unwrap();

    assert_eq!(planner.directions().calls(), 2);
    assert_eq!(back.route.points.first(), Some(&DALLAS));
}

#[tokio::test]
async fn blank_addresses_are_rejected_without_provider_calls() {
    let planner = planner(240.0);

    for (start, end) in [("", "Dallas, TX"), ("Houston, TX", "   ")] {
        let err = planner.plan(start, end).await.unwrap_err();
        assert!(matches!(err, PlanError::InvalidRequest(_)));
    }

    assert_eq!(planner.geocoder().calls(), 0);
    assert_eq!(planner.directions().calls(), 0);
}

#[tokio::test]
async fn unknown_address_is_a_provider_error_and_not_cached() {
    let planner = planner(240.0);

    let err = planner.plan("Atlantis", "Dallas, TX").await.unwrap_err();
    match err {
        PlanError::Provider(e) => assert!(e.is_not_found()),
        other => panic!("expected provider error, got {other:?}"),
    }
    assert_eq!(planner.directions().calls(), 0);

    assert!(planner.plan("Atlantis", "Dallas, TX").await.is_err());
    assert_eq!(planner.geocoder().calls(), 4);
}

#[tokio::test]
async fn provider_status_failure_propagates() {
    let mut directions = MockDirections::new(240.0);
    directions.fail_with_status = Some(402);
    let planner = planner_with(directions, vec![], PlannerConfig::default());

    let err = planner.plan("Houston, TX", "Dallas, TX").await.unwrap_err();

    assert!(matches!(
        err,
        PlanError::Provider(ProviderError::Status { code: 402, .. })
    ));
}

#[tokio::test]
async fn slow_provider_hits_request_deadline() {
    let mut directions = MockDirections::new(240.0);
    directions.delay = Duration::from_secs(5);
    let config = PlannerConfig::default().with_request_timeout(Duration::from_millis(50));
    let planner = planner_with(directions, vec![], config);

    let err = planner.plan("Houston, TX", "Dallas, TX").await.unwrap_err();

    assert!(matches!(err, PlanError::Timeout));
}

#[tokio::test]
async fn station_details_geocodes_sentinel_and_writes_back() {
    let planner = planner_with(
        MockDirections::new(0.0),
        vec![station(1, "3.25", LonLat::UNKNOWN)],
        PlannerConfig::default(),
    );

    let details = planner.station_details(1).await.unwrap().unwrap();
    assert_eq!(details.location, HOUSTON);

    let stored = planner.optimizer().store().get(1).await.unwrap().unwrap();
    assert_eq!(stored.location, HOUSTON);

    // Already located; no further geocoding
    planner.station_details(1).await.unwrap();
    assert_eq!(planner.geocoder().calls(), 1);
}

#[tokio::test]
async fn station_details_keeps_sentinel_on_geocode_failure() {
    let planner = planner_with(
        MockDirections::new(0.0),
        vec![station(9, "3.25", LonLat::UNKNOWN)],
        PlannerConfig::default(),
    );

    let details = planner.station_details(9).await.unwrap().unwrap();

    assert!(details.needs_geocoding());
    assert!(
        planner
            .optimizer()
            .store()
            .get(9)
            .await
            .unwrap()
            .unwrap()
            .needs_geocoding()
    );
}

#[tokio::test]
async fn station_details_unknown_id() {
    let planner = planner(240.0);
    assert!(planner.station_details(404).await.unwrap().is_none());
}

#[tokio::test]
async fn station_details_geocode_goes_through_cache() {
    let planner = RoutePlanner::new(
        CachedGeocoder::new(
            MockGeocoder::new(),
            MokaResultCache::new(&CacheConfig::default()),
            Duration::from_secs(60),
        ),
        MockDirections::new(0.0),
        RouteOptimizer::new(
            MemoryStationStore::from_stations(vec![station(1, "3.25", LonLat::UNKNOWN)]),
            OptimizerConfig::default(),
        ),
        MokaResultCache::new(&CacheConfig::default()),
        PlannerConfig::default(),
    );

    planner.station_details(1).await.unwrap();
    // Same address geocoded directly is served from cache
    let location = planner.geocoder().geocode("1 Test St, TestCity, TX").await.unwrap();

    assert_eq!(location, HOUSTON);
    assert_eq!(planner.geocoder().inner().calls(), 1);
}
