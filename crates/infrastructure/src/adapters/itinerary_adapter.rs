//! Itinerary adapter - Implements ItineraryPort using the Digitransit routing client

use application::error::ApplicationError;
use application::ports::ItineraryPort;
use async_trait::async_trait;
use chrono_tz::Tz;
use domain::{Itinerary, RouteQuery};
use integration_transit::{DigitransitConfig, DigitransitRoutingClient, RoutingClient};
use tracing::{debug, error, instrument};

/// Adapter for itinerary planning
///
/// There is nothing to fall back to once coordinates are resolved, so every
/// client failure becomes `ExternalService`.
pub struct ItineraryAdapter<C = DigitransitRoutingClient> {
    client: C,
}

impl<C> std::fmt::Debug for ItineraryAdapter<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryAdapter").finish_non_exhaustive()
    }
}

impl<C: RoutingClient> ItineraryAdapter<C> {
    /// Wrap an existing routing client
    pub const fn new(client: C) -> Self {
        Self { client }
    }
}

impl ItineraryAdapter<DigitransitRoutingClient> {
    /// Create an adapter talking to the Digitransit routing engine
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn digitransit(config: &DigitransitConfig, timezone: Tz) -> Result<Self, ApplicationError> {
        let client = DigitransitRoutingClient::new(config, timezone)
            .map_err(|e| ApplicationError::Configuration(format!("Routing client: {e}")))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl<C: RoutingClient> ItineraryPort for ItineraryAdapter<C> {
    #[instrument(skip(self), fields(from = %query.origin, to = %query.destination))]
    async fn plan(&self, query: &RouteQuery) -> Result<Vec<Itinerary>, ApplicationError> {
        let itineraries = self
            .client
            .plan(
                query.origin,
                query.destination,
                query.departure,
                query.itinerary_count,
            )
            .await
            .map_err(|e| {
                error!(error = %e, "Routing engine call failed");
                ApplicationError::ExternalService(format!("Itinerary planning failed: {e}"))
            })?;

        debug!(count = itineraries.len(), "Itineraries planned");
        Ok(itineraries)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
