//! Route search handler
//!
//! Accepts flat coordinates, nested `{lat, lon}` objects or place names and
//! answers with the itineraries the routing engine ranked, in engine order.

use application::RouteRequest;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use domain::{Itinerary, Leg};
use serde::Serialize;
use tracing::instrument;

use crate::{error::ApiError, state::AppState};

/// Response body of a successful search
#[derive(Debug, Serialize)]
pub struct RouteSearchResponse {
    pub routes: Vec<ItineraryResponse>,
}

/// One trip option
///
/// Carries both the minute-rounded summary and the raw per-leg timing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub duration_seconds: u64,
    pub duration_minutes: u64,
    pub walk_distance_meters: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub transfers: usize,
    pub summary: String,
    pub legs: Vec<Leg>,
}

impl ItineraryResponse {
    /// Build the response with the summary rendered in `timezone`
    pub fn new(itinerary: Itinerary, timezone: Tz) -> Self {
        Self {
            duration_seconds: itinerary.duration_seconds,
            duration_minutes: itinerary.duration_minutes(),
            walk_distance_meters: itinerary.walk_distance_meters,
            start_time: itinerary.start_time(),
            end_time: itinerary.end_time(),
            transfers: itinerary.transfers(),
            summary: itinerary.format_summary(&timezone),
            legs: itinerary.legs,
        }
    }
}

/// Search itineraries between two places
#[instrument(skip(state, payload))]
pub async fn route_search(
    State(state): State<AppState>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteSearchResponse>, ApiError> {
    let Json(request) = payload?;
    let itineraries = state.route_service.search(&request).await?;
    let timezone = state.route_service.timezone();

    Ok(Json(RouteSearchResponse {
        routes: itineraries
            .into_iter()
            .map(|itinerary| ItineraryResponse::new(itinerary, timezone))
            .collect(),
    }))
}
