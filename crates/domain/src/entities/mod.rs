//! Domain entities

mod geo_candidate;
mod itinerary;
mod route_query;

pub use geo_candidate::GeoCandidate;
pub use itinerary::{Itinerary, Leg, Stop, TransitMode};
pub use route_query::{DEFAULT_ITINERARY_COUNT, RouteQuery};
