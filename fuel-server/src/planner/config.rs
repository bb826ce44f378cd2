//! Planner configuration.

use std::time::Duration;

/// Request-level settings for route planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// How long a fetched route stays cached.
    pub cache_ttl: Duration,

    /// Deadline for one planning request, provider calls included.
    pub request_timeout: Duration,
}

impl PlannerConfig {
    /// Set the route cache TTL.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the request deadline.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(60 * 60),
            request_timeout: Duration::from_secs(30),
        }
    }
}
