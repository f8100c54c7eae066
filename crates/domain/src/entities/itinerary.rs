//! Itinerary models
//!
//! Typed representations of trip options, their legs and the stops passed on
//! the way, as produced by the routing engine and handed to the UI.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// One complete trip option from origin to destination
///
/// Legs are kept in the order the routing engine produced them; the first
/// leg starts at the overall origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    /// Total trip duration in seconds
    pub duration_seconds: u64,
    /// Total walking distance in meters
    pub walk_distance_meters: f64,
    /// Ordered legs
    pub legs: Vec<Leg>,
}

impl Itinerary {
    /// Total duration rounded half-up to whole minutes
    #[must_use]
    pub const fn duration_minutes(&self) -> u64 {
        (self.duration_seconds + 30) / 60
    }

    /// Departure of the first leg
    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.legs.first().map(|l| l.start_time)
    }

    /// Arrival of the last leg
    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.legs.last().map(|l| l.end_time)
    }

    /// Number of transfers between transit vehicles
    #[must_use]
    pub fn transfers(&self) -> usize {
        self.legs
            .iter()
            .filter(|leg| leg.mode.is_transit())
            .count()
            .saturating_sub(1)
    }

    /// Format as a compact one-line summary with times shown in `tz`
    #[must_use]
    pub fn format_summary<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let (Some(dep), Some(arr)) = (self.start_time(), self.end_time()) else {
            return String::from("No itinerary data");
        };

        let lines: Vec<String> = self
            .legs
            .iter()
            .filter(|l| l.mode.is_transit())
            .map(|l| {
                l.route_short_name
                    .clone()
                    .unwrap_or_else(|| l.mode.label().to_string())
            })
            .collect();

        format!(
            "{} → {} ({}min, {} transfers) {}",
            dep.with_timezone(tz).format("%H:%M"),
            arr.with_timezone(tz).format("%H:%M"),
            self.duration_minutes(),
            self.transfers(),
            lines.join(" → ")
        )
    }
}

/// One uninterrupted segment of a trip using a single transport mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub mode: TransitMode,
    pub from_name: String,
    pub to_name: String,
    pub from_coord: Coordinate,
    pub to_coord: Coordinate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Raw leg duration in seconds, as reported by the engine
    pub duration_seconds: f64,
    pub distance_meters: f64,
    /// Line number, e.g. "550" or "M1" (None for walking)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_long_name: Option<String>,
    #[serde(default)]
    pub intermediate_stops: Vec<Stop>,
}

/// A stop passed through during a leg
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
}

impl Stop {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinate: None,
        }
    }

    #[must_use]
    pub const fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Transport mode of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Walk,
    Bus,
    Tram,
    Metro,
    Train,
    Ferry,
}

impl TransitMode {
    /// Map a routing engine mode string to a transit mode
    ///
    /// Personal movement the engine may report (bicycle, car, scooter) is
    /// treated as walking.
    #[must_use]
    pub fn from_engine_mode(mode: &str) -> Self {
        match mode.to_ascii_uppercase().as_str() {
            "BUS" | "TROLLEYBUS" | "COACH" => Self::Bus,
            "TRAM" | "CABLE_CAR" | "GONDOLA" | "FUNICULAR" => Self::Tram,
            "SUBWAY" | "METRO" | "MONORAIL" => Self::Metro,
            "RAIL" | "TRAIN" => Self::Train,
            "FERRY" => Self::Ferry,
            _ => Self::Walk,
        }
    }

    /// Whether the mode uses a scheduled vehicle
    #[must_use]
    pub const fn is_transit(&self) -> bool {
        !matches!(self, Self::Walk)
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Bus => "Bus",
            Self::Tram => "Tram",
            Self::Metro => "Metro",
            Self::Train => "Train",
            Self::Ferry => "Ferry",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
