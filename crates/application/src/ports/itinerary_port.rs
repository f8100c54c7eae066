//! Itinerary planning port
//!
//! Defines the interface to the transit routing engine. Adapters in the
//! infrastructure layer implement this port using the engine's API.

use async_trait::async_trait;
use domain::{Itinerary, RouteQuery};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for itinerary planning
///
/// Unlike geocoding providers there is no fallback behind this port, so
/// transport and status failures are returned as `ExternalService` errors.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItineraryPort: Send + Sync {
    /// Plan itineraries for a query, in the order the engine ranked them
    ///
    /// An empty list means the engine found no path.
    async fn plan(&self, query: &RouteQuery) -> Result<Vec<Itinerary>, ApplicationError>;

    /// Check if the routing engine is reachable
    async fn is_available(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ItineraryPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ItineraryPort>();
    }
}
