//! Place name resolution
//!
//! Providers are consulted in order and the region filter is applied after
//! each call. The first provider with an in-region candidate wins, even if a
//! later provider might have a better match.

use std::sync::Arc;

use domain::{GeoCandidate, ServiceRegion};
use tracing::{debug, instrument, warn};

use crate::ports::GeocodeProvider;

/// Outcome of resolving a place name
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// First in-region candidate of the first provider that had one
    Resolved(GeoCandidate),
    /// Providers found the name, but only outside the service region
    OutOfRegion(GeoCandidate),
    /// No provider returned anything
    NotFound,
}

/// Resolves free-text place names to in-region candidates
pub struct Geocoder {
    providers: Vec<Arc<dyn GeocodeProvider>>,
    region: ServiceRegion,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("region", &self.region)
            .finish()
    }
}

impl Geocoder {
    /// Create a geocoder consulting `providers` in the given order
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn GeocodeProvider>>, region: ServiceRegion) -> Self {
        Self { providers, region }
    }

    /// The region candidates are filtered against
    #[must_use]
    pub const fn region(&self) -> &ServiceRegion {
        &self.region
    }

    /// Resolve a place name
    #[instrument(skip(self))]
    pub async fn resolve(&self, place_name: &str) -> Resolution {
        let name = place_name.trim();
        if name.is_empty() {
            return Resolution::NotFound;
        }

        let mut first_outside = None;

        for provider in &self.providers {
            let candidates = match provider.search(name).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(provider = provider.name(), input = name, error = %e, "Geocode provider failed");
                    continue;
                },
            };

            debug!(
                provider = provider.name(),
                count = candidates.len(),
                "Geocode provider returned candidates"
            );

            if let Some(pos) = candidates.iter().position(|c| self.region.contains(c)) {
                if let Some(found) = candidates.into_iter().nth(pos) {
                    return Resolution::Resolved(found);
                }
            } else if first_outside.is_none() {
                first_outside = candidates.into_iter().next();
            }
        }

        first_outside.map_or(Resolution::NotFound, Resolution::OutOfRegion)
    }
}
