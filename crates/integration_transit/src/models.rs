//! Routing engine response models
//!
//! Raw shapes of the Digitransit `plan` GraphQL response and their
//! conversion into domain itineraries.

use chrono::{DateTime, Utc};
use domain::{Coordinate, Itinerary, Leg, Stop, TransitMode};
use serde::Deserialize;

use crate::error::TransitError;

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse {
    pub data: Option<PlanData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlanData {
    pub plan: Option<RawPlan>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlan {
    pub itineraries: Option<Vec<RawItinerary>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawItinerary {
    pub duration: Option<f64>,
    pub walk_distance: Option<f64>,
    #[serde(default)]
    pub legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawLeg {
    pub mode: Option<String>,
    pub start_time: i64,
    pub end_time: i64,
    pub duration: Option<f64>,
    pub distance: Option<f64>,
    pub from: RawPlace,
    pub to: RawPlace,
    pub route: Option<RawRoute>,
    pub intermediate_places: Option<Vec<RawPlace>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPlace {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRoute {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
}

impl GraphQlResponse {
    /// Extract itineraries in engine order
    ///
    /// A missing itinerary array is an empty result. Errors without data
    /// mean the engine rejected the query.
    pub(crate) fn into_itineraries(self) -> Result<Vec<Itinerary>, TransitError> {
        let Some(data) = self.data else {
            let message = if self.errors.is_empty() {
                "response has neither data nor errors".to_string()
            } else {
                self.errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            return Err(TransitError::QueryRejected(message));
        };

        data.plan
            .and_then(|p| p.itineraries)
            .unwrap_or_default()
            .into_iter()
            .map(RawItinerary::into_domain)
            .collect()
    }
}

impl RawItinerary {
    fn into_domain(self) -> Result<Itinerary, TransitError> {
        let legs = self
            .legs
            .into_iter()
            .map(RawLeg::into_domain)
            .collect::<Result<Vec<_>, _>>()?;

        let duration_seconds = match self.duration {
            Some(d) if d.is_finite() && d > 0.0 => seconds(d),
            _ => span_seconds(&legs),
        };

        Ok(Itinerary {
            duration_seconds,
            walk_distance_meters: self.walk_distance.unwrap_or(0.0),
            legs,
        })
    }
}

impl RawLeg {
    #[allow(clippy::cast_precision_loss)]
    fn into_domain(self) -> Result<Leg, TransitError> {
        let start_time = timestamp(self.start_time)?;
        let end_time = timestamp(self.end_time)?;
        let duration_seconds = self.duration.unwrap_or_else(|| {
            (end_time - start_time).num_milliseconds() as f64 / 1000.0
        });
        let (route_short_name, route_long_name) = self
            .route
            .map_or((None, None), |r| (r.short_name, r.long_name));

        Ok(Leg {
            mode: TransitMode::from_engine_mode(self.mode.as_deref().unwrap_or("WALK")),
            from_name: self.from.name.clone().unwrap_or_default(),
            to_name: self.to.name.clone().unwrap_or_default(),
            from_coord: self.from.coordinate()?,
            to_coord: self.to.coordinate()?,
            start_time,
            end_time,
            duration_seconds,
            distance_meters: self.distance.unwrap_or(0.0),
            route_short_name,
            route_long_name,
            intermediate_stops: self
                .intermediate_places
                .unwrap_or_default()
                .into_iter()
                .map(RawPlace::into_stop)
                .collect(),
        })
    }
}

impl RawPlace {
    fn coordinate(&self) -> Result<Coordinate, TransitError> {
        Coordinate::new(self.lat, self.lon).map_err(|e| TransitError::ParseError(e.to_string()))
    }

    fn into_stop(self) -> Stop {
        let stop = Stop::new(self.name.clone().unwrap_or_default());
        match self.coordinate() {
            Ok(c) => stop.with_coordinate(c),
            Err(_) => stop,
        }
    }
}

fn timestamp(millis: i64) -> Result<DateTime<Utc>, TransitError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| TransitError::ParseError(format!("timestamp out of range: {millis}")))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

fn span_seconds(legs: &[Leg]) -> u64 {
    match (legs.first(), legs.last()) {
        (Some(first), Some(last)) => {
            u64::try_from((last.end_time - first.start_time).num_seconds()).unwrap_or(0)
        },
        _ => 0,
    }
}
