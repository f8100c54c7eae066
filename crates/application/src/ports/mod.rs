//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocode_provider;
mod itinerary_port;

#[cfg(test)]
pub use geocode_provider::MockGeocodeProvider;
pub use geocode_provider::{GeocodeProvider, ProviderError};
#[cfg(test)]
pub use itinerary_port::MockItineraryPort;
pub use itinerary_port::ItineraryPort;
