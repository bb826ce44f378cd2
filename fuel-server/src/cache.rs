//! Caching layer for provider responses.
//!
//! Geocodes are cached by address and routes by (start, end) address pair.
//! The cache is an injected `ResultCache`, so tests get an isolated instance
//! and the backend can be swapped without touching the planner.

use std::future::Future;
use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::LonLat;
use crate::provider::{Geocoder, ProviderError};

/// Cache key for a geocoded address.
pub fn geocode_key(address: &str) -> String {
    format!("geocode_{}", address.trim())
}

/// Cache key for a route between two addresses.
pub fn route_key(start: &str, end: &str) -> String {
    format!("route_{}_{}", start.trim(), end.trim())
}

/// Key/value cache with a per-entry time to live.
pub trait ResultCache<V>: Send + Sync {
    /// Look up a live entry.
    fn get(&self, key: &str) -> impl Future<Output = Option<V>> + Send;

    /// Store an entry that expires after `ttl`.
    fn set(&self, key: String, value: V, ttl: Duration) -> impl Future<Output = ()> + Send;
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set the maximum number of entries.
    pub fn with_max_capacity(mut self, max_capacity: u64) -> Self {
        self.max_capacity = max_capacity;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cached value together with its own lifetime.
#[derive(Clone)]
struct Entry<V> {
    value: V,
    ttl: Duration,
}

/// Expires each entry after the TTL it was stored with.
struct PerEntryTtl;

impl<V> Expiry<String, Entry<V>> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// In-process `ResultCache` backed by moka.
pub struct MokaResultCache<V> {
    entries: MokaCache<String, Entry<V>>,
}

impl<V: Clone + Send + Sync + 'static> MokaResultCache<V> {
    /// Create a new cache with the given configuration.
    ///
    /// `config.ttl` is not applied here; each `set` carries its own TTL.
    pub fn new(config: &CacheConfig) -> Self {
        let entries = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { entries }
    }
}

impl<V: Clone + Send + Sync + 'static> ResultCache<V> for MokaResultCache<V> {
    async fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).await.map(|entry| entry.value)
    }

    async fn set(&self, key: String, value: V, ttl: Duration) {
        self.entries.insert(key, Entry { value, ttl }).await;
    }
}

/// Geocoder with caching.
///
/// Wraps a `Geocoder` and caches successful lookups by address. Failures are
/// never cached.
pub struct CachedGeocoder<G, C> {
    inner: G,
    cache: C,
    ttl: Duration,
}

impl<G, C> CachedGeocoder<G, C>
where
    G: Geocoder,
    C: ResultCache<LonLat>,
{
    /// Create a new cached geocoder.
    pub fn new(inner: G, cache: C, ttl: Duration) -> Self {
        Self { inner, cache, ttl }
    }

    /// Access the underlying geocoder for lookups that bypass the cache.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

impl<G, C> Geocoder for CachedGeocoder<G, C>
where
    G: Geocoder,
    C: ResultCache<LonLat>,
{
    async fn geocode(&self, address: &str) -> Result<LonLat, ProviderError> {
        let key = geocode_key(address);

        // Try cache first
        if let Some(cached) = self.cache.get(&key).await {
            debug!(address, "geocode cache hit");
            return Ok(cached);
        }

        let location = self.inner.geocode(address).await?;

        self.cache.set(key, location, self.ttl).await;

        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    impl CountingGeocoder {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, address: &str) -> Result<LonLat, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if address == "Atlantis" {
                return Err(ProviderError::NoResults(address.to_string()));
            }
            Ok(LonLat::new(-95.37, 29.76))
        }
    }

    #[test]
    fn keys_are_deterministic() {
        assert_eq!(geocode_key("Houston, TX"), "geocode_Houston, TX");
        assert_eq!(geocode_key("  Houston, TX "), geocode_key("Houston, TX"));
        assert_eq!(
            route_key("Houston, TX", "Dallas, TX"),
            "route_Houston, TX_Dallas, TX"
        );
        assert_ne!(route_key("A", "B"), route_key("B", "A"));
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 10_000);

        let config = config
            .with_ttl(Duration::from_secs(5))
            .with_max_capacity(10);
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert_eq!(config.max_capacity, 10);
    }

    #[tokio::test]
    async fn set_then_get() {
        let cache: MokaResultCache<String> = MokaResultCache::new(&CacheConfig::default());
        assert_eq!(cache.get("k").await, None);

        cache
            .set("k".to_string(), "v".to_string(), Duration::from_secs(60))
            .await;
        assert_eq!(cache.get("k").await.as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn entries_expire_after_their_ttl() {
        let cache: MokaResultCache<u32> = MokaResultCache::new(&CacheConfig::default());

        cache.set("short".to_string(), 1, Duration::from_millis(50)).await;
        cache.set("long".to_string(), 2, Duration::from_secs(60)).await;

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.get("short").await, None);
        assert_eq!(cache.get("long").await, Some(2));
    }

    #[tokio::test]
    async fn cached_geocoder_hits_provider_once() {
        let cached = CachedGeocoder::new(
            CountingGeocoder::new(),
            MokaResultCache::new(&CacheConfig::default()),
            Duration::from_secs(60),
        );

        let first = cached.geocode("Houston, TX").await.unwrap();
        let second = cached.geocode("Houston, TX").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner().calls(), 1);
    }

    #[tokio::test]
    async fn cached_geocoder_does_not_cache_failures() {
        let cached = CachedGeocoder::new(
            CountingGeocoder::new(),
            MokaResultCache::new(&CacheConfig::default()),
            Duration::from_secs(60),
        );

        assert!(cached.geocode("Atlantis").await.is_err());
        assert!(cached.geocode("Atlantis").await.is_err());
        assert_eq!(cached.inner().calls(), 2);
    }
}
