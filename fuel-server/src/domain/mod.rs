//! Domain types for the fuel route planner.
//!
//! Types here enforce their invariants at construction time where they can
//! (state codes), and carry the longitude-first coordinate convention used
//! everywhere past the provider boundary.

mod coord;
mod error;
mod route;
mod state;
mod station;

pub use coord::{LonLat, METERS_PER_MILE};
pub use error::DomainError;
pub use route::{Route, sample_index};
pub use state::{InvalidStateCode, StateCode};
pub use station::{FuelStation, OpisId, Station};
