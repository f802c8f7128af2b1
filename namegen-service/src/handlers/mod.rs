//! HTTP handlers.
//!
//! `generate` holds the deployment-independent request handler plus the two
//! thin entry points that feed it.

pub mod app;
pub mod generate;
pub mod health;
pub mod metrics;
