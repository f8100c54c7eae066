//! Infrastructure adapters
//!
//! Adapters connect application ports to the provider clients.

mod geocoding_adapter;
mod itinerary_adapter;

pub use geocoding_adapter::GeocodingProviderAdapter;
pub use itinerary_adapter::ItineraryAdapter;
