//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `region`: service region and its time zone
//! - `integrations`: Digitransit routing and geocoding
//!
//! Nominatim settings are taken as-is from the client crate since they carry
//! no secrets.

mod integrations;
mod region;
mod server;

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use integration_transit::NominatimConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use integrations::DigitransitAppConfig;
pub use region::RegionAppConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "REITTI";

/// Separator between prefix and nested keys, e.g. `REITTI__SERVER__PORT`
pub const ENV_SEPARATOR: &str = "__";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Service region
    #[serde(default)]
    pub region: RegionAppConfig,

    /// Structured-search geocoding provider
    #[serde(default)]
    pub nominatim: NominatimConfig,

    /// Routing engine and POI geocoding provider
    #[serde(default)]
    pub digitransit: DigitransitAppConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// Sources in increasing precedence: built-in defaults, `config.toml`
    /// in the working directory, `REITTI__*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::defaults()?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .with_list_parse_key("region.localities")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)
    }

    /// Check the loaded values before any client is built
    ///
    /// A missing Digitransit subscription key is only warned about since
    /// some deployments point at keyless endpoints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.region.validate().map_err(section_error("region"))?;
        self.nominatim
            .validate()
            .map_err(section_error("nominatim"))?;
        self.digitransit
            .validate()
            .map_err(section_error("digitransit"))?;

        if self.server.max_body_size_json_bytes == 0 {
            return Err(ConfigError::Message(
                "server: max_body_size_json_bytes must be greater than 0".to_string(),
            ));
        }

        if !self.digitransit.has_subscription_key() {
            warn!(
                "No Digitransit subscription key configured \
                 (set {ENV_PREFIX}__DIGITRANSIT__SUBSCRIPTION_KEY); requests may be rejected"
            );
        }

        info!(
            region = %self.region.region_name,
            localities = ?self.region.localities,
            routing_url = %self.digitransit.routing_url,
            "Configuration validated"
        );
        Ok(())
    }
}

fn section_error(section: &'static str) -> impl Fn(String) -> ConfigError {
    move |message| ConfigError::Message(format!("{section}: {message}"))
}
