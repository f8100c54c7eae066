//! Route search use case
//!
//! Drives a request through normalization, region validation and itinerary
//! resolution. Every stage may short-circuit with an error; the HTTP layer
//! maps the error kind to a status code.

use std::fmt;
use std::sync::Arc;

use chrono_tz::Tz;
use domain::{Itinerary, RouteQuery};
use tracing::{debug, error, info, instrument};

use crate::error::ApplicationError;
use crate::ports::ItineraryPort;
use crate::services::input_normalizer::{InputNormalizer, RouteRequest, parse_departure};

/// Error text when the routing engine found no path
pub const NO_ROUTES_FOUND: &str = "no routes found";

/// Stage a route request is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStage {
    Received,
    Normalizing,
    ValidatingRegion,
    ResolvingItinerary,
    Responding,
}

impl fmt::Display for RouteStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Normalizing => "normalizing",
            Self::ValidatingRegion => "validating_region",
            Self::ResolvingItinerary => "resolving_itinerary",
            Self::Responding => "responding",
        };
        f.write_str(name)
    }
}

/// Route search orchestration
pub struct RouteService {
    normalizer: InputNormalizer,
    itineraries: Arc<dyn ItineraryPort>,
    timezone: Tz,
    itinerary_count: u8,
}

impl fmt::Debug for RouteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteService")
            .field("normalizer", &self.normalizer)
            .field("timezone", &self.timezone)
            .field("itinerary_count", &self.itinerary_count)
            .finish_non_exhaustive()
    }
}

impl RouteService {
    #[must_use]
    pub fn new(
        normalizer: InputNormalizer,
        itineraries: Arc<dyn ItineraryPort>,
        timezone: Tz,
    ) -> Self {
        Self {
            normalizer,
            itineraries,
            timezone,
            itinerary_count: domain::DEFAULT_ITINERARY_COUNT,
        }
    }

    /// Set the upper bound on itineraries requested from the engine
    #[must_use]
    pub const fn with_itinerary_count(mut self, count: u8) -> Self {
        self.itinerary_count = count;
        self
    }

    /// Search itineraries for a request body
    ///
    /// Returns `Validation` for unusable input, `NotFound` when the engine
    /// found no path and `ExternalService` when the engine call failed.
    #[instrument(skip(self, request))]
    pub async fn search(&self, request: &RouteRequest) -> Result<Vec<Itinerary>, ApplicationError> {
        let mut stage = RouteStage::Received;
        let result = self.run(request, &mut stage).await;
        let failed_at = stage;
        stage = RouteStage::Responding;

        match &result {
            Ok(itineraries) => info!(%stage, count = itineraries.len(), "Route search succeeded"),
            Err(ApplicationError::ExternalService(e)) => {
                error!(%stage, %failed_at, error = %e, "Routing engine failed");
            },
            Err(e) => info!(%stage, %failed_at, error = %e, "Route search rejected"),
        }
        result
    }

    async fn run(
        &self,
        request: &RouteRequest,
        stage: &mut RouteStage,
    ) -> Result<Vec<Itinerary>, ApplicationError> {
        *stage = RouteStage::Normalizing;
        debug!(%stage);
        let endpoints = self.normalizer.normalize(request).await?;
        let departure = request
            .date_time
            .as_deref()
            .map(|value| parse_departure(value, self.timezone))
            .transpose()?;

        // Region check already happened in the normalizer for named places
        *stage = RouteStage::ValidatingRegion;
        debug!(%stage, origin = %endpoints.origin, destination = %endpoints.destination);

        *stage = RouteStage::ResolvingItinerary;
        debug!(%stage);
        let query = RouteQuery::new(endpoints.origin, endpoints.destination)
            .with_departure(departure)
            .with_itinerary_count(self.itinerary_count);
        let itineraries = self.itineraries.plan(&query).await?;

        if itineraries.is_empty() {
            return Err(ApplicationError::NotFound(NO_ROUTES_FOUND.to_string()));
        }
        Ok(itineraries)
    }

    /// Zone departure times are read in and shown in
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Check if the routing engine is reachable
    pub async fn is_ready(&self) -> bool {
        self.itineraries.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use domain::{Coordinate, Leg, ServiceRegion, TransitMode};
    use mockall::predicate::always;
    use serde_json::json;

    use super::*;
    use crate::ports::{GeocodeProvider, MockGeocodeProvider, MockItineraryPort};
    use crate::services::geocoder::Geocoder;
    use crate::services::input_normalizer::MISSING_COORDINATES;

    fn itinerary() -> Itinerary {
        let point = Coordinate::new(60.17, 24.94).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 2, 11, 8, 0, 0).unwrap();
        Itinerary {
            duration_seconds: 1_200,
            walk_distance_meters: 300.0,
            legs: vec![Leg {
                mode: TransitMode::Bus,
                from_name: "A".into(),
                to_name: "B".into(),
                from_coord: point,
                to_coord: point,
                start_time: start,
                end_time: start + chrono::Duration::minutes(20),
                duration_seconds: 1_200.0,
                distance_meters: 9_000.0,
                route_short_name: Some("550".into()),
                route_long_name: None,
                intermediate_stops: vec![],
            }],
        }
    }

    fn service(port: MockItineraryPort) -> RouteService {
        let mut provider = MockGeocodeProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_search().returning(|_| Ok(vec![]));
        let providers: Vec<Arc<dyn GeocodeProvider>> = vec![Arc::new(provider)];
        let geocoder = Arc::new(Geocoder::new(providers, ServiceRegion::capital_area()));
        RouteService::new(
            InputNormalizer::new(geocoder),
            Arc::new(port),
            chrono_tz::Europe::Helsinki,
        )
        .with_itinerary_count(3)
    }

    fn coordinates_body(extra: serde_json::Value) -> RouteRequest {
        let mut body = json!({
            "fromLat": 60.1699, "fromLon": 24.9384, "toLat": 60.2055, "toLon": 24.6559
        });
        if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            body.extend(extra.clone());
        }
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn returns_itineraries() {
        let mut port = MockItineraryPort::new();
        port.expect_plan()
            .withf(|q| q.itinerary_count == 3 && q.departure.is_none())
            .times(1)
            .returning(|_| Ok(vec![itinerary()]));

        let routes = service(port).search(&coordinates_body(json!({}))).await.unwrap();
        assert_eq!(routes.len(), 1);
        assert!(routes[0].duration_seconds > 0);
    }

    #[tokio::test]
    async fn departure_time_is_passed_to_engine() {
        let mut port = MockItineraryPort::new();
        port.expect_plan()
            .withf(|q| q.departure == Some(Utc.with_ymd_and_hms(2026, 10, 19, 5, 30, 0).unwrap()))
            .times(1)
            .returning(|_| Ok(vec![itinerary()]));

        let body = coordinates_body(json!({"dateTime": "2026-10-19T08:30:00+03:00"}));
        assert!(service(port).search(&body).await.is_ok());
    }

    #[tokio::test]
    async fn empty_result_is_not_found() {
        let mut port = MockItineraryPort::new();
        port.expect_plan().returning(|_| Ok(vec![]));

        let err = service(port).search(&coordinates_body(json!({}))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(ref m) if m == NO_ROUTES_FOUND));
    }

    #[tokio::test]
    async fn engine_failure_propagates() {
        let mut port = MockItineraryPort::new();
        port.expect_plan()
            .returning(|_| Err(ApplicationError::ExternalService("HTTP 503".into())));

        let err = service(port).search(&coordinates_body(json!({}))).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[tokio::test]
    async fn bad_input_never_reaches_engine() {
        let mut port = MockItineraryPort::new();
        port.expect_plan().with(always()).times(0);

        let err = service(port)
            .search(&RouteRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn bad_date_time_is_validation_error() {
        let mut port = MockItineraryPort::new();
        port.expect_plan().times(0);

        let body = coordinates_body(json!({"dateTime": "soon"}));
        let err = service(port).search(&body).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(_)));
    }

    #[tokio::test]
    async fn unusable_shape_wins_over_bad_date_time() {
        let mut port = MockItineraryPort::new();
        port.expect_plan().times(0);

        let body: RouteRequest =
            serde_json::from_value(json!({"origin": "Kamppi", "dateTime": "soon"})).unwrap();
        let err = service(port).search(&body).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Validation(ref m) if m == MISSING_COORDINATES));
    }

    #[tokio::test]
    async fn readiness_reflects_engine() {
        let mut port = MockItineraryPort::new();
        port.expect_is_available().returning(|| false);
        assert!(!service(port).is_ready().await);
    }

    #[test]
    fn stage_names() {
        assert_eq!(RouteStage::ValidatingRegion.to_string(), "validating_region");
        assert_eq!(RouteStage::Responding.to_string(), "responding");
    }
}
