//! Web layer for the fuel route planner.
//!
//! Provides the JSON API for planning fuel stops and looking up stations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LivePlanner};
