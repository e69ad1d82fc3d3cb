//! Plumbing shared by EatReal binaries: configuration loading, the JSON
//! error body, health probes, request ids, tracing setup and serde helpers.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
