//! Provider configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the Digitransit routing and geocoding APIs
#[derive(Clone, Serialize, Deserialize)]
pub struct DigitransitConfig {
    /// GraphQL endpoint of the routing engine
    #[serde(default = "default_routing_url")]
    pub routing_url: String,

    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    /// Value for the `digitransit-subscription-key` header
    #[serde(default)]
    pub subscription_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of itineraries requested per search
    #[serde(default = "default_max_itineraries")]
    pub max_itineraries: u8,

    /// Maximum number of geocoding results requested
    #[serde(default = "default_result_size")]
    pub result_size: u8,

    /// Language for geocoding labels
    #[serde(default = "default_language")]
    pub language: String,
}

impl std::fmt::Debug for DigitransitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitransitConfig")
            .field("routing_url", &self.routing_url)
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field(
                "subscription_key",
                &self.subscription_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("max_itineraries", &self.max_itineraries)
            .field("result_size", &self.result_size)
            .field("language", &self.language)
            .finish()
    }
}

fn default_routing_url() -> String {
    "https://api.digitransit.fi/routing/v2/hsl/gtfs/v1".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://api.digitransit.fi".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_itineraries() -> u8 {
    5
}

const fn default_result_size() -> u8 {
    10
}

fn default_language() -> String {
    "fi".to_string()
}

impl Default for DigitransitConfig {
    fn default() -> Self {
        Self {
            routing_url: default_routing_url(),
            geocoding_base_url: default_geocoding_base_url(),
            subscription_key: None,
            timeout_secs: default_timeout_secs(),
            max_itineraries: default_max_itineraries(),
            result_size: default_result_size(),
            language: default_language(),
        }
    }
}

impl DigitransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            subscription_key: Some("test-key".to_string()),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_url("routing_url", &self.routing_url)?;
        validate_url("geocoding_base_url", &self.geocoding_base_url)?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.max_itineraries == 0 {
            return Err("max_itineraries must be greater than 0".to_string());
        }

        if self.max_itineraries > 10 {
            return Err("max_itineraries must be 10 or less".to_string());
        }

        if self.result_size == 0 {
            return Err("result_size must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Configuration for the Nominatim search API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_nominatim_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_nominatim_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of results per query
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,

    /// Country appended to the query on the second attempt (empty to disable)
    #[serde(default = "default_country_name")]
    pub country_name: String,

    /// User-Agent sent with every request, required by the usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_nominatim_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_nominatim_timeout_secs() -> u64 {
    5
}

const fn default_result_limit() -> u8 {
    10
}

fn default_country_name() -> String {
    "Finland".to_string()
}

fn default_user_agent() -> String {
    concat!("reitti/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_nominatim_base_url(),
            timeout_secs: default_nominatim_timeout_secs(),
            result_limit: default_result_limit(),
            country_name: default_country_name(),
            user_agent: default_user_agent(),
        }
    }
}

impl NominatimConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_url("base_url", &self.base_url)?;

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.result_limit == 0 {
            return Err("result_limit must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }

        Ok(())
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    Ok(())
}
