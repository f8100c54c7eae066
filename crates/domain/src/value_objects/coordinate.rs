//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 coordinate pair
///
/// Both components are finite, latitude lies in [-90, 90] and longitude in
/// [-180, 180]. Deserialization goes through the same check as [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
    }
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either component is not finite,
    /// latitude is not in [-90, 90] or longitude is not in [-180, 180]
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite()
            || !lon.is_finite()
            || !(-90.0..=90.0).contains(&lat)
            || !(-180.0..=180.0).contains(&lon)
        {
            return Err(InvalidCoordinates);
        }
        Ok(Self { lat, lon })
    }

    /// Get the latitude
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Get the longitude
    #[must_use]
    pub const fn lon(&self) -> f64 {
        self.lon
    }

    /// Stable textual key used to recognise the same physical point
    /// emitted twice under different labels
    #[must_use]
    pub fn dedup_key(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
