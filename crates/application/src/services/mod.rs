//! Application services - Use case implementations

mod autocomplete_service;
mod geocoder;
mod input_normalizer;
mod route_service;

pub use autocomplete_service::{
    AutocompleteService, DEFAULT_SUGGESTION_LIMIT, MIN_QUERY_CHARS, Suggestion,
};
pub use geocoder::{Geocoder, Resolution};
pub use input_normalizer::{
    Endpoints, INVALID_COORDINATES, InputNormalizer, MISSING_COORDINATES, RouteRequest, Side,
    parse_departure,
};
pub use route_service::{NO_ROUTES_FOUND, RouteService, RouteStage};
