//! Geocoding provider adapter - Implements GeocodeProvider using integration_transit
//!
//! Every client failure is reported as a `ProviderError` so the geocoder can
//! fall through to the next provider instead of failing the request.

use application::error::ApplicationError;
use application::ports::{GeocodeProvider, ProviderError};
use async_trait::async_trait;
use domain::GeoCandidate;
use integration_transit::{
    DIGITRANSIT, DigitransitConfig, DigitransitGeocodingClient, GeocodingClient, GeocodingError,
    NOMINATIM, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

/// Adapter exposing a geocoding client as a provider
pub struct GeocodingProviderAdapter<C> {
    name: &'static str,
    client: C,
}

impl<C> std::fmt::Debug for GeocodingProviderAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeocodingProviderAdapter")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<C: GeocodingClient> GeocodingProviderAdapter<C> {
    /// Wrap an existing client under the given provider name
    pub const fn new(name: &'static str, client: C) -> Self {
        Self { name, client }
    }
}

impl GeocodingProviderAdapter<NominatimGeocodingClient> {
    /// Structured-search provider backed by Nominatim
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn nominatim(config: &NominatimConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(format!("Nominatim client: {e}")))?;
        Ok(Self::new(NOMINATIM, client))
    }
}

impl GeocodingProviderAdapter<DigitransitGeocodingClient> {
    /// POI provider backed by the Digitransit geocoding API
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn digitransit(config: &DigitransitConfig) -> Result<Self, ApplicationError> {
        let client = DigitransitGeocodingClient::new(config)
            .map_err(|e| ApplicationError::Configuration(format!("Digitransit client: {e}")))?;
        Ok(Self::new(DIGITRANSIT, client))
    }
}

/// Map a client failure onto the provider error channel
fn map_error(error: GeocodingError) -> ProviderError {
    if error.is_transport() {
        ProviderError::Unavailable(error.to_string())
    } else {
        ProviderError::InvalidResponse(error.to_string())
    }
}

#[async_trait]
impl<C: GeocodingClient> GeocodeProvider for GeocodingProviderAdapter<C> {
    fn name(&self) -> &'static str {
        self.name
    }

    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<GeoCandidate>, ProviderError> {
        let candidates = self.client.search(text).await.map_err(map_error)?;
        debug!(provider = self.name, count = candidates.len(), "Provider search finished");
        Ok(candidates)
    }

    #[instrument(skip(self))]
    async fn suggest(&self, text: &str) -> Result<Vec<GeoCandidate>, ProviderError> {
        let candidates = self.client.suggest(text).await.map_err(map_error)?;
        debug!(provider = self.name, count = candidates.len(), "Provider suggest finished");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use domain::Coordinate;

    use super::*;

    struct FixedClient {
        search: fn() -> Result<Vec<GeoCandidate>, GeocodingError>,
    }

    #[async_trait]
    impl GeocodingClient for FixedClient {
        async fn search(&self, _text: &str) -> Result<Vec<GeoCandidate>, GeocodingError> {
            (self.search)()
        }
    }

    fn kamppi() -> Result<Vec<GeoCandidate>, GeocodingError> {
        Ok(vec![GeoCandidate::new(
            Coordinate::new(60.1686, 24.931).unwrap(),
            "Kamppi",
            "fixed",
        )])
    }

    #[tokio::test]
    async fn test_search_passes_candidates_through() {
        let adapter = GeocodingProviderAdapter::new("fixed", FixedClient { search: kamppi });
        let candidates = adapter.search("kamppi").await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].display_name, "Kamppi");
        assert_eq!(adapter.name(), "fixed");
    }

    #[tokio::test]
    async fn test_suggest_defaults_to_search() {
        let adapter = GeocodingProviderAdapter::new("fixed", FixedClient { search: kamppi });
        assert_eq!(adapter.suggest("kam").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_errors_are_unavailable() {
        let adapter = GeocodingProviderAdapter::new(
            "fixed",
            FixedClient {
                search: || Err(GeocodingError::Timeout),
            },
        );
        assert!(matches!(
            adapter.search("x").await,
            Err(ProviderError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_status_and_parse_errors_are_invalid_response() {
        let adapter = GeocodingProviderAdapter::new(
            "fixed",
            FixedClient {
                search: || Err(GeocodingError::RequestFailed("HTTP 500".to_string())),
            },
        );
        assert!(matches!(
            adapter.search("x").await,
            Err(ProviderError::InvalidResponse(m)) if m.contains("HTTP 500")
        ));

        assert_eq!(
            map_error(GeocodingError::ParseError("eof".to_string())),
            ProviderError::InvalidResponse("Geocoding parse error: eof".to_string())
        );
    }

    #[test]
    fn test_named_constructors() {
        let nominatim = GeocodingProviderAdapter::nominatim(&NominatimConfig::for_testing()).unwrap();
        assert_eq!(nominatim.name(), NOMINATIM);

        let digitransit =
            GeocodingProviderAdapter::digitransit(&DigitransitConfig::for_testing()).unwrap();
        assert_eq!(digitransit.name(), DIGITRANSIT);
        assert!(format!("{digitransit:?}").contains("digitransit"));
    }
}
