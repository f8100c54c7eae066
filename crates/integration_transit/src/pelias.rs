//! Digitransit geocoding client
//!
//! POI-style search and autocomplete against the Digitransit geocoding API
//! (Pelias). Results carry human-readable labels and the municipality they lie in.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, GeoCandidate};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::DigitransitConfig;
use crate::error::GeocodingError;
use crate::geocoding::GeocodingClient;

/// Provider name attached to candidates from this client
pub const DIGITRANSIT: &str = "digitransit";

/// Header carrying the Digitransit subscription key
pub const SUBSCRIPTION_KEY_HEADER: &str = "digitransit-subscription-key";

/// Digitransit geocoding client
#[derive(Debug)]
pub struct DigitransitGeocodingClient {
    client: Client,
    config: DigitransitConfig,
}

impl DigitransitGeocodingClient {
    /// Create a new Digitransit geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &DigitransitConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn fetch(&self, endpoint: &str, text: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/geocoding/v1/{endpoint}", self.config.geocoding_base_url);
        let params = [
            ("text", text.to_string()),
            ("size", self.config.result_size.to_string()),
            ("lang", self.config.language.clone()),
        ];

        debug!(endpoint, text, "Digitransit geocoding request");

        let mut request = self.client.get(&url).query(&params);
        if let Some(key) = &self.config.subscription_key {
            request = request.header(SUBSCRIPTION_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GeocodingError::from_reqwest(&e))?;

        if !response.status().is_success() {
            return Err(GeocodingError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let candidates = Self::parse_features(&body)?;
        debug!(endpoint, count = candidates.len(), "Digitransit geocoding results");
        Ok(candidates)
    }

    /// Parse a GeoJSON feature collection into candidates
    ///
    /// Features without a usable point geometry are skipped.
    fn parse_features(body: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        let raw: RawFeatureCollection =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(raw
            .features
            .into_iter()
            .filter_map(Self::convert_feature)
            .collect())
    }

    fn convert_feature(value: serde_json::Value) -> Option<GeoCandidate> {
        let feature: RawFeature = serde_json::from_value(value.clone()).ok()?;
        let [lon, lat] = feature.geometry.coordinates;
        let Ok(coordinate) = Coordinate::new(lat, lon) else {
            debug!(%lat, %lon, "Skipping feature with invalid coordinates");
            return None;
        };

        let props = feature.properties;
        let label = props.label.or(props.name).unwrap_or_default();
        let locality = props.localadmin.or(props.locality).unwrap_or_default();

        Some(
            GeoCandidate::new(coordinate, label, DIGITRANSIT)
                .with_area(locality, props.region.unwrap_or_default())
                .with_raw(value),
        )
    }
}

#[async_trait]
impl GeocodingClient for DigitransitGeocodingClient {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        self.fetch("search", text).await
    }

    #[instrument(skip(self))]
    async fn suggest(&self, text: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        self.fetch("autocomplete", text).await
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawGeometry,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    label: Option<String>,
    name: Option<String>,
    localadmin: Option<String>,
    locality: Option<String>,
    region: Option<String>,
}
