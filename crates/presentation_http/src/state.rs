//! Application state shared across handlers

use std::sync::Arc;

use application::{
    ApplicationError, AutocompleteService, GeocodeProvider, Geocoder, InputNormalizer,
    RouteService,
};
use infrastructure::{AppConfig, GeocodingProviderAdapter, ItineraryAdapter};
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Route search pipeline
    pub route_service: Arc<RouteService>,
    /// Place suggestions
    pub autocomplete_service: Arc<AutocompleteService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("route_service", &self.route_service)
            .field("autocomplete_service", &self.autocomplete_service)
            .finish()
    }
}

impl AppState {
    pub fn new(route_service: RouteService, autocomplete_service: AutocompleteService) -> Self {
        Self {
            route_service: Arc::new(route_service),
            autocomplete_service: Arc::new(autocomplete_service),
        }
    }

    /// Wire providers, services and the routing engine from configuration
    ///
    /// Name resolution asks the structured-search provider first; suggestions
    /// ask the POI provider first.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let region = config.region.to_service_region();
        let timezone = config
            .region
            .timezone()
            .map_err(ApplicationError::Configuration)?;
        let digitransit = config.digitransit.to_digitransit_config();

        let structured: Arc<dyn GeocodeProvider> =
            Arc::new(GeocodingProviderAdapter::nominatim(&config.nominatim)?);
        let poi: Arc<dyn GeocodeProvider> =
            Arc::new(GeocodingProviderAdapter::digitransit(&digitransit)?);

        let geocoder = Geocoder::new(vec![Arc::clone(&structured), Arc::clone(&poi)], region.clone());
        let autocomplete = AutocompleteService::new(vec![poi, structured], region)
            .with_limit(config.digitransit.suggestion_limit);

        let itineraries = ItineraryAdapter::digitransit(&digitransit, timezone)?;
        let route_service = RouteService::new(
            InputNormalizer::new(Arc::new(geocoder)),
            Arc::new(itineraries),
            timezone,
        )
        .with_itinerary_count(digitransit.max_itineraries);

        info!(
            timezone = %timezone,
            max_itineraries = digitransit.max_itineraries,
            "Services initialized"
        );

        Ok(Self::new(route_service, autocomplete))
    }
}
