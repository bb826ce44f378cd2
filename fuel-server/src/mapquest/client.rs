//! MapQuest HTTP client.
//!
//! Provides async methods for the MapQuest geocoding and directions APIs.
//! Handles authentication, concurrency limiting, and conversion to domain
//! types.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{LonLat, Route};
use crate::provider::{DirectionsProvider, Geocoder};

use super::convert::{convert_geocode, convert_route};
use super::error::ProviderError;
use super::types::{DirectionsResponse, GeocodeResponse};

/// Default base URL for the MapQuest API.
pub const DEFAULT_BASE_URL: &str = "https://www.mapquestapi.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the MapQuest client.
#[derive(Debug, Clone)]
pub struct MapQuestConfig {
    /// API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production MapQuest)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MapQuestConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MapQuest API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct MapQuestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl MapQuestClient {
    /// Create a new MapQuest client with the given configuration.
    pub fn new(config: MapQuestConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ProviderError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Geocode a free-text address.
    pub async fn geocode_address(&self, address: &str) -> Result<LonLat, ProviderError> {
        let resp: GeocodeResponse = self
            .get_json(
                "geocoding/v1/address",
                &[("location", address.to_string()), ("maxResults", "1".to_string())],
            )
            .await?;

        convert_geocode(&resp, address)
    }

    /// Get the fastest driving route between two positions.
    ///
    /// Positions are sent as `lat,lng` pairs, which MapQuest accepts in place
    /// of addresses.
    pub async fn directions(&self, from: LonLat, to: LonLat) -> Result<Route, ProviderError> {
        let resp: DirectionsResponse = self
            .get_json(
                "directions/v2/route",
                &[
                    ("from", lat_lng_param(from)),
                    ("to", lat_lng_param(to)),
                    ("routeType", "fastest".to_string()),
                    ("doReverseGeocode", "false".to_string()),
                    ("fullShape", "true".to_string()),
                    ("unit", "m".to_string()),
                ],
            )
            .await?;

        convert_route(&resp)
    }

    /// Issue an authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ProviderError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "MapQuest request");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

/// Format a position as MapQuest's `lat,lng` location string.
fn lat_lng_param(p: LonLat) -> String {
    format!("{},{}", p.lat, p.lon)
}

impl Geocoder for MapQuestClient {
    async fn geocode(&self, address: &str) -> Result<LonLat, ProviderError> {
        self.geocode_address(address).await
    }
}

impl DirectionsProvider for MapQuestClient {
    async fn route(&self, from: LonLat, to: LonLat) -> Result<Route, ProviderError> {
        self.directions(from, to).await
    }
}
