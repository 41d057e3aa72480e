//! apikit - a small JSON-over-HTTP service built around an endpoint pipeline
//!
//! Each route composes a transport-agnostic endpoint with a decode adapter
//! and an encode adapter; the telemetry interceptor observes requests as
//! middleware ahead of routing.

pub mod api;
pub mod config;
pub mod telemetry;
pub mod transport;
