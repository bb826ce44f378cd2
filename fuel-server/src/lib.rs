//! Fuel route planner server.
//!
//! A web service that answers: "driving from A to B, where should I stop
//! for fuel to spend the least?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod mapquest;
pub mod optimizer;
pub mod planner;
pub mod provider;
pub mod store;
pub mod web;
