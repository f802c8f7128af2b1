//! service-core: Shared infrastructure for the name generator deployments.
pub mod config;
pub mod cors;
pub mod error;
pub mod middleware;
pub mod observability;

