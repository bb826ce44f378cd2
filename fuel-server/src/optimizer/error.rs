//! Planning errors.

use crate::domain::DomainError;
use crate::provider::ProviderError;
use crate::store::StoreError;

/// Error from route planning or fuel-stop optimization.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Caller supplied something unusable
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Geocoding or directions failed
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Station lookup or write-back failed
    #[error("station store error: {0}")]
    Store(#[from] StoreError),

    /// Planning did not finish before the request deadline
    #[error("route planning timed out")]
    Timeout,
}

impl From<DomainError> for PlanError {
    fn from(err: DomainError) -> Self {
        PlanError::InvalidRequest(err.to_string())
    }
}
