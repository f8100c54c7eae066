//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports on top of the provider clients and
//! carries configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, DigitransitAppConfig, RegionAppConfig, ServerConfig};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};
