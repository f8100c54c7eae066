//! Nominatim geocoding client
//!
//! Structured place search using the [Nominatim](https://nominatim.openstreetmap.org)
//! API (OpenStreetMap).

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinate, GeoCandidate};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;

/// Provider name attached to candidates from this client
pub const NOMINATIM: &str = "nominatim";

/// Trait for text-to-location clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for a place name; an empty list means no results
    async fn search(&self, text: &str) -> Result<Vec<GeoCandidate>, GeocodingError>;

    /// Suggestions for partially typed text
    async fn suggest(&self, text: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        self.search(text).await
    }
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn query(&self, q: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        let url = format!("{}/search", self.config.base_url);
        let params = [
            ("q", q.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", self.config.result_limit.to_string()),
            ("addressdetails", "1".to_string()),
        ];

        debug!(query = q, "Nominatim search");

        let response = self
            .client
            .get(&url)
            .query(&params)
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

        Self::parse_search_response(&body)
    }

    /// Parse a Nominatim search response into candidates
    ///
    /// Records with unparsable or out-of-range coordinates are skipped.
    fn parse_search_response(body: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(raw.into_iter().filter_map(Self::convert_result).collect())
    }

    fn convert_result(value: serde_json::Value) -> Option<GeoCandidate> {
        let result: NominatimResult = serde_json::from_value(value.clone()).ok()?;
        let lat = result.lat.parse().ok()?;
        let lon = result.lon.parse().ok()?;
        let Ok(coordinate) = Coordinate::new(lat, lon) else {
            debug!(%lat, %lon, "Skipping Nominatim result with invalid coordinates");
            return None;
        };

        let address = result.address.unwrap_or_default();
        let locality = first_of([
            address.city,
            address.town,
            address.village,
            address.municipality,
        ]);
        let region = first_of([address.state, address.region, address.county]);

        Some(
            GeoCandidate::new(
                coordinate,
                result.display_name.unwrap_or_default(),
                NOMINATIM,
            )
            .with_area(locality, region)
            .with_raw(value),
        )
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    /// Search the raw text, then retry once with the country appended
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.query(text).await?;
        if !candidates.is_empty() || self.config.country_name.is_empty() {
            return Ok(candidates);
        }

        let qualified = format!("{text}, {}", self.config.country_name);
        let candidates = self.query(&qualified).await?;
        debug!(count = candidates.len(), "Nominatim country-qualified search");
        Ok(candidates)
    }
}

fn first_of<const N: usize>(fields: [Option<String>; N]) -> String {
    fields
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or_default()
}

/// Raw Nominatim API record
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    state: Option<String>,
    region: Option<String>,
    county: Option<String>,
}
