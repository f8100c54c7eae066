//! Service region configuration.

use chrono_tz::Tz;
use domain::ServiceRegion;
use serde::{Deserialize, Serialize};

/// The metropolitan area served and its wall-clock time zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionAppConfig {
    /// Municipalities accepted as in-region (case-insensitive)
    #[serde(default = "default_localities")]
    pub localities: Vec<String>,

    /// Containing region name (case-insensitive)
    #[serde(default = "default_region_name")]
    pub region_name: String,

    /// IANA time zone used for departure times
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_localities() -> Vec<String> {
    ["helsinki", "espoo", "vantaa", "kauniainen"]
        .map(String::from)
        .to_vec()
}

fn default_region_name() -> String {
    "uusimaa".to_string()
}

fn default_timezone() -> String {
    "Europe/Helsinki".to_string()
}

impl Default for RegionAppConfig {
    fn default() -> Self {
        Self {
            localities: default_localities(),
            region_name: default_region_name(),
            timezone: default_timezone(),
        }
    }
}

impl RegionAppConfig {
    /// Build the domain region rule
    #[must_use]
    pub fn to_service_region(&self) -> ServiceRegion {
        ServiceRegion::new(&self.localities, self.region_name.as_str())
    }

    /// Parse the configured time zone
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a known IANA zone.
    pub fn timezone(&self) -> Result<Tz, String> {
        self.timezone
            .trim()
            .parse::<Tz>()
            .map_err(|_| format!("unknown time zone: '{}'", self.timezone))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.to_service_region().localities().is_empty() {
            return Err("region.localities must not be empty".to_string());
        }
        self.timezone()?;
        Ok(())
    }
}
