//! Geocoding provider port
//!
//! A provider turns free text into candidate locations. Several providers sit
//! behind this one interface and are consulted in a fixed order.

use async_trait::async_trait;
use domain::GeoCandidate;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Failure of a single provider call
///
/// Callers treat this as "the provider returned nothing" and move on to the
/// next provider. It never reaches the HTTP caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Provider could not be reached or timed out
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with an error status or an unreadable payload
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Port for a text-to-location provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Short provider name used in logs and on candidates
    fn name(&self) -> &'static str;

    /// Search for a place name; an empty list means no results
    async fn search(&self, text: &str) -> Result<Vec<GeoCandidate>, ProviderError>;

    /// Suggestions for partially typed text
    ///
    /// Providers without a dedicated suggestion endpoint fall back to search.
    async fn suggest(&self, text: &str) -> Result<Vec<GeoCandidate>, ProviderError> {
        self.search(text).await
    }
}
