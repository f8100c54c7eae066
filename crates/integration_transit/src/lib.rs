//! Transit provider integration for the journey planner
//!
//! Provides itinerary planning via the [Digitransit](https://digitransit.fi)
//! routing engine (GraphQL), POI search and autocomplete via the Digitransit
//! geocoding API, and structured place search via
//! [Nominatim/OpenStreetMap](https://nominatim.openstreetmap.org).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern. [`RoutingClient`] defines
//! itinerary planning, implemented by [`DigitransitRoutingClient`].
//! [`GeocodingClient`] defines text search, implemented by
//! [`NominatimGeocodingClient`] and [`DigitransitGeocodingClient`].
//! Clients return domain types directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{DigitransitConfig, DigitransitRoutingClient, RoutingClient};
//!
//! let config = DigitransitConfig::default();
//! let client = DigitransitRoutingClient::new(&config, chrono_tz::Europe::Helsinki)?;
//!
//! let itineraries = client.plan(origin, destination, None, 5).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;
mod pelias;

pub use client::{DigitransitRoutingClient, RoutingClient};
pub use config::{DigitransitConfig, NominatimConfig};
pub use error::{GeocodingError, TransitError};
pub use geocoding::{GeocodingClient, NOMINATIM, NominatimGeocodingClient};
pub use pelias::{DIGITRANSIT, DigitransitGeocodingClient, SUBSCRIPTION_KEY_HEADER};
