//! Domain error types.
//!
//! These errors represent validation failures on route input. They are
//! distinct from provider and storage errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Route has no points to sample
    #[error("route must contain at least one point")]
    EmptyRoute,

    /// Distance is negative, not a number, or too long to plan
    #[error("invalid route distance: {0}")]
    InvalidDistance(f64),
}
