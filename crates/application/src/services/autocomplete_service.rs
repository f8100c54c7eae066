//! Location suggestions for partially typed input
//!
//! Uses the same providers as the geocoder but in suggestion mode and with
//! the POI-style provider first, because it returns human-labeled results.

use std::collections::HashSet;
use std::sync::Arc;

use domain::{Coordinate, GeoCandidate, ServiceRegion};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::ports::GeocodeProvider;

/// Queries shorter than this return no suggestions
pub const MIN_QUERY_CHARS: usize = 2;

/// Default maximum number of suggestions
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// A single suggestion as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub local_admin_area: String,
    pub region_name: String,
}

impl From<GeoCandidate> for Suggestion {
    fn from(candidate: GeoCandidate) -> Self {
        Self {
            name: candidate.display_name,
            coordinate: candidate.coordinate,
            local_admin_area: candidate.local_admin_area,
            region_name: candidate.region_name,
        }
    }
}

/// Suggests in-region places for partial input
pub struct AutocompleteService {
    providers: Vec<Arc<dyn GeocodeProvider>>,
    region: ServiceRegion,
    limit: usize,
}

impl std::fmt::Debug for AutocompleteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutocompleteService")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}

impl AutocompleteService {
    /// Create a service consulting `providers` in the given order
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn GeocodeProvider>>, region: ServiceRegion) -> Self {
        Self {
            providers,
            region,
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }

    /// Set the maximum number of suggestions
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Suggest places for `query`
    ///
    /// Never fails; provider errors degrade to an empty list.
    #[instrument(skip(self))]
    pub async fn suggest(&self, query: &str) -> Vec<Suggestion> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        for provider in &self.providers {
            let candidates = match provider.suggest(query).await {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!(provider = provider.name(), input = query, error = %e, "Suggestion provider failed");
                    continue;
                },
            };

            let suggestions = self.filter_and_dedup(candidates);
            debug!(
                provider = provider.name(),
                count = suggestions.len(),
                "Suggestions after region filter"
            );
            if !suggestions.is_empty() {
                return suggestions;
            }
        }

        Vec::new()
    }

    fn filter_and_dedup(&self, candidates: Vec<GeoCandidate>) -> Vec<Suggestion> {
        let mut seen = HashSet::new();
        self.region
            .retain_members(candidates)
            .into_iter()
            .filter(|c| seen.insert(c.coordinate.dedup_key()))
            .take(self.limit)
            .map(Suggestion::from)
            .collect()
    }
}
