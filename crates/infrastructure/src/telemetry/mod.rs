//! Logging infrastructure
//!
//! Sets up the global `tracing` subscriber for the server.

mod subscriber;

pub use subscriber::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
