//! Provider configurations: Digitransit (routing + POI geocoding) and Nominatim.

use integration_transit::DigitransitConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Digitransit configuration
///
/// One subscription key authorizes both the routing engine and the
/// geocoding API.
#[derive(Clone, Serialize, Deserialize)]
pub struct DigitransitAppConfig {
    /// GraphQL endpoint of the routing engine
    #[serde(default = "default_routing_url")]
    pub routing_url: String,

    /// Base URL of the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub geocoding_base_url: String,

    /// Subscription key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub subscription_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Itineraries requested per search, 1 to 10 (default: 5)
    #[serde(default = "default_max_itineraries")]
    pub max_itineraries: u8,

    /// Results requested per geocoding call (default: 10)
    #[serde(default = "default_result_size")]
    pub result_size: u8,

    /// Maximum autocomplete entries returned to clients (default: 10)
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,

    /// Language for geocoding labels (default: fi)
    #[serde(default = "default_language")]
    pub language: String,
}

impl std::fmt::Debug for DigitransitAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitransitAppConfig")
            .field("routing_url", &self.routing_url)
            .field("geocoding_base_url", &self.geocoding_base_url)
            .field(
                "subscription_key",
                &if self.subscription_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("max_itineraries", &self.max_itineraries)
            .field("result_size", &self.result_size)
            .field("suggestion_limit", &self.suggestion_limit)
            .field("language", &self.language)
            .finish()
    }
}

fn default_routing_url() -> String {
    DigitransitConfig::default().routing_url
}

fn default_geocoding_base_url() -> String {
    DigitransitConfig::default().geocoding_base_url
}

fn default_timeout_secs() -> u64 {
    DigitransitConfig::default().timeout_secs
}

fn default_max_itineraries() -> u8 {
    DigitransitConfig::default().max_itineraries
}

fn default_result_size() -> u8 {
    DigitransitConfig::default().result_size
}

const fn default_suggestion_limit() -> usize {
    application::DEFAULT_SUGGESTION_LIMIT
}

fn default_language() -> String {
    DigitransitConfig::default().language
}

impl Default for DigitransitAppConfig {
    fn default() -> Self {
        Self {
            routing_url: default_routing_url(),
            geocoding_base_url: default_geocoding_base_url(),
            subscription_key: None,
            timeout_secs: default_timeout_secs(),
            max_itineraries: default_max_itineraries(),
            result_size: default_result_size(),
            suggestion_limit: default_suggestion_limit(),
            language: default_language(),
        }
    }
}

impl DigitransitAppConfig {
    /// Convert to the client configuration
    #[must_use]
    pub fn to_digitransit_config(&self) -> DigitransitConfig {
        DigitransitConfig {
            routing_url: self.routing_url.clone(),
            geocoding_base_url: self.geocoding_base_url.clone(),
            subscription_key: self
                .subscription_key
                .as_ref()
                .map(|k| k.expose_secret().to_string())
                .filter(|k| !k.trim().is_empty()),
            timeout_secs: self.timeout_secs,
            max_itineraries: self.max_itineraries,
            result_size: self.result_size,
            language: self.language.clone(),
        }
    }

    /// Whether a non-empty subscription key is configured
    #[must_use]
    pub fn has_subscription_key(&self) -> bool {
        self.subscription_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.suggestion_limit == 0 {
            return Err("suggestion_limit must be greater than 0".to_string());
        }
        self.to_digitransit_config().validate()
    }
}
