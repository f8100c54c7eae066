//! A provider's opinion about where a place name points

use serde::{Deserialize, Serialize};

use crate::region::Place;
use crate::value_objects::Coordinate;

/// A single candidate location proposed by a geocoding provider
///
/// `raw` holds the provider's original record. It is owned by the candidate
/// and only kept for debugging and propagation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoCandidate {
    /// Resolved coordinate
    pub coordinate: Coordinate,
    /// Human-readable label
    pub display_name: String,
    /// Municipality the provider placed the candidate in (may be empty)
    pub local_admin_area: String,
    /// Administrative region the provider placed the candidate in (may be empty)
    pub region_name: String,
    /// Name of the provider that produced the candidate
    pub source_provider: String,
    /// Provider's original record
    #[serde(skip_serializing)]
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl GeoCandidate {
    /// Create a candidate without a raw record
    #[must_use]
    pub fn new(
        coordinate: Coordinate,
        display_name: impl Into<String>,
        source_provider: impl Into<String>,
    ) -> Self {
        Self {
            coordinate,
            display_name: display_name.into(),
            local_admin_area: String::new(),
            region_name: String::new(),
            source_provider: source_provider.into(),
            raw: serde_json::Value::Null,
        }
    }

    /// Set the locality and region labels
    #[must_use]
    pub fn with_area(
        mut self,
        local_admin_area: impl Into<String>,
        region_name: impl Into<String>,
    ) -> Self {
        self.local_admin_area = local_admin_area.into();
        self.region_name = region_name.into();
        self
    }

    /// Attach the provider's original record
    #[must_use]
    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw = raw;
        self
    }
}

impl Place for GeoCandidate {
    fn local_admin_area(&self) -> &str {
        &self.local_admin_area
    }

    fn region_name(&self) -> &str {
        &self.region_name
    }
}
