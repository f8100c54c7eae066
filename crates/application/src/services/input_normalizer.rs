//! Route request normalization
//!
//! Map clicks arrive as raw coordinates and text search arrives as place
//! names. Both are reduced to one origin/destination pair here. Shapes are
//! tried in a fixed order: flat fields, nested objects, then place names.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use domain::Coordinate;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::services::geocoder::{Geocoder, Resolution};

/// Error text for a body matching none of the accepted shapes
pub const MISSING_COORDINATES: &str = "missing coordinates or invalid format";

/// Error text for coordinates outside the valid ranges
pub const INVALID_COORDINATES: &str = "invalid coordinates";

/// Incoming route search body
///
/// Fields stay loosely typed so that shape dispatch can fall through instead
/// of rejecting the whole body on the first type mismatch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    #[serde(default)]
    pub from_lat: Option<Value>,
    #[serde(default)]
    pub from_lon: Option<Value>,
    #[serde(default)]
    pub to_lat: Option<Value>,
    #[serde(default)]
    pub to_lon: Option<Value>,
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub to: Option<Value>,
    /// Departure time (RFC 3339 or naive local time in the region time zone)
    #[serde(default)]
    pub date_time: Option<String>,
}

/// Canonical origin/destination pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Endpoints {
    pub origin: Coordinate,
    pub destination: Coordinate,
}

/// Which end of the trip an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Origin,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

/// Reduces request bodies to validated endpoints
#[derive(Debug)]
pub struct InputNormalizer {
    geocoder: Arc<Geocoder>,
}

impl InputNormalizer {
    #[must_use]
    pub const fn new(geocoder: Arc<Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Normalize a request body into origin and destination coordinates
    #[instrument(skip(self, request))]
    pub async fn normalize(&self, request: &RouteRequest) -> Result<Endpoints, ApplicationError> {
        if let Some(endpoints) = flat_coordinates(request) {
            debug!("Using flat coordinate fields");
            return endpoints;
        }

        if let (Some(from), Some(to)) = (
            request.from.as_ref().and_then(nested_pair),
            request.to.as_ref().and_then(nested_pair),
        ) {
            debug!("Using nested coordinate objects");
            return endpoints(from, to);
        }

        if let (Some(Value::String(from)), Some(Value::String(to))) = (&request.from, &request.to)
        {
            debug!("Resolving place names");
            return self.resolve_names(from, to).await;
        }

        Err(ApplicationError::Validation(MISSING_COORDINATES.to_string()))
    }

    async fn resolve_names(&self, from: &str, to: &str) -> Result<Endpoints, ApplicationError> {
        let (origin, destination) =
            tokio::join!(self.geocoder.resolve(from), self.geocoder.resolve(to));

        let origin = self.accept(Side::Origin, from, origin)?;
        let destination = self.accept(Side::Destination, to, destination)?;

        Ok(Endpoints {
            origin,
            destination,
        })
    }

    fn accept(
        &self,
        side: Side,
        name: &str,
        resolution: Resolution,
    ) -> Result<Coordinate, ApplicationError> {
        let name = name.trim();
        match resolution {
            Resolution::Resolved(candidate) if self.geocoder.region().contains(&candidate) => {
                Ok(candidate.coordinate)
            },
            Resolution::Resolved(_) | Resolution::OutOfRegion(_) => Err(
                ApplicationError::Validation(format!(
                    "{side} '{name}' is outside the service region"
                )),
            ),
            Resolution::NotFound => Err(ApplicationError::Validation(format!(
                "{side} location not found: '{name}'"
            ))),
        }
    }
}

fn flat_coordinates(request: &RouteRequest) -> Option<Result<Endpoints, ApplicationError>> {
    let from = (
        numeric(request.from_lat.as_ref()?)?,
        numeric(request.from_lon.as_ref()?)?,
    );
    let to = (
        numeric(request.to_lat.as_ref()?)?,
        numeric(request.to_lon.as_ref()?)?,
    );
    Some(endpoints(from, to))
}

fn nested_pair(value: &Value) -> Option<(f64, f64)> {
    let object = value.as_object()?;
    Some((numeric(object.get("lat")?)?, numeric(object.get("lon")?)?))
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn endpoints(from: (f64, f64), to: (f64, f64)) -> Result<Endpoints, ApplicationError> {
    let invalid = |_| ApplicationError::Validation(INVALID_COORDINATES.to_string());
    Ok(Endpoints {
        origin: Coordinate::new(from.0, from.1).map_err(invalid)?,
        destination: Coordinate::new(to.0, to.1).map_err(invalid)?,
    })
}

/// Parse a departure time
///
/// Accepts RFC 3339, or a naive `YYYY-MM-DDTHH:MM[:SS]` interpreted as wall
/// time in `timezone`.
pub fn parse_departure(value: &str, timezone: Tz) -> Result<DateTime<Utc>, ApplicationError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| ApplicationError::Validation(format!("invalid dateTime: '{value}'")))?;

    timezone
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            ApplicationError::Validation(format!("dateTime does not exist locally: '{value}'"))
        })
}
