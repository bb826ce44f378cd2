//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::mapquest::{DEFAULT_BASE_URL, MapQuestConfig};
use crate::optimizer::OptimizerConfig;
use crate::planner::PlannerConfig;
use crate::store::StationSnapshotConfig;

/// Error reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Variable is set but does not parse
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    /// Values parse but are out of range
    #[error("invalid configuration: {0}")]
    OutOfRange(String),
}

/// Everything the server and import binaries need to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mapquest: MapQuestConfig,
    pub optimizer: OptimizerConfig,
    pub cache: CacheConfig,
    pub planner: PlannerConfig,
    pub snapshot: StationSnapshotConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("MAP_QUEST_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            warn!("MAP_QUEST_API_KEY not set; geocoding and directions will fail");
        }
        let base_url = lookup("MAP_QUEST_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let http_timeout: u64 = parse_var(&lookup, "HTTP_TIMEOUT_SECS", 10)?;

        let mapquest = MapQuestConfig::new(api_key)
            .with_base_url(base_url)
            .with_timeout(http_timeout);

        let optimizer = OptimizerConfig::new(
            parse_var(&lookup, "MILES_PER_GALLON", 10.0)?,
            parse_var(&lookup, "MAX_RANGE", 500.0)?,
        )
        .with_search_radius(parse_var(&lookup, "SEARCH_RADIUS_MILES", 50.0)?)
        .with_lookup_concurrency(parse_var(&lookup, "LOOKUP_CONCURRENCY", 4)?);
        optimizer.validate().map_err(ConfigError::OutOfRange)?;

        let cache_ttl = Duration::from_secs(parse_var(&lookup, "CACHE_TIMEOUT", 3600)?);
        let cache = CacheConfig::default()
            .with_ttl(cache_ttl)
            .with_max_capacity(parse_var(&lookup, "CACHE_MAX_CAPACITY", 10_000)?);

        let request_timeout: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        if request_timeout == 0 {
            return Err(ConfigError::OutOfRange(
                "request timeout must be at least one second".to_string(),
            ));
        }
        let planner = PlannerConfig::default()
            .with_cache_ttl(cache_ttl)
            .with_request_timeout(Duration::from_secs(request_timeout));

        let snapshot = lookup("STATIONS_SNAPSHOT")
            .map(|path| StationSnapshotConfig::new(PathBuf::from(path)))
            .unwrap_or_default();

        let bind_addr = parse_var(&lookup, "BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 8000)))?;

        Ok(Self {
            mapquest,
            optimizer,
            cache,
            planner,
            snapshot,
            bind_addr,
        })
    }
}

/// Parse `name` if set, otherwise use `default`.
fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
