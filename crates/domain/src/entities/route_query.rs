//! Routing engine query

use chrono::{DateTime, Utc};

use crate::value_objects::Coordinate;

/// Default number of itineraries requested from the routing engine
pub const DEFAULT_ITINERARY_COUNT: u8 = 5;

/// A request for itineraries between two coordinates
///
/// Origin equal to destination is allowed; the routing engine decides what
/// to return for the degenerate case.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteQuery {
    /// Trip origin
    pub origin: Coordinate,
    /// Trip destination
    pub destination: Coordinate,
    /// Departure time (None = now)
    pub departure: Option<DateTime<Utc>>,
    /// Maximum number of itineraries to request
    pub itinerary_count: u8,
}

impl RouteQuery {
    /// Create a query departing now
    #[must_use]
    pub const fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            departure: None,
            itinerary_count: DEFAULT_ITINERARY_COUNT,
        }
    }

    /// Set departure time
    #[must_use]
    pub const fn with_departure(mut self, departure: Option<DateTime<Utc>>) -> Self {
        self.departure = departure;
        self
    }

    /// Set maximum number of itineraries
    #[must_use]
    pub const fn with_itinerary_count(mut self, count: u8) -> Self {
        self.itinerary_count = count;
        self
    }
}
