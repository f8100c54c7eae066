//! Domain layer for the journey planner
//!
//! Contains the location and itinerary model, the service-region rule and
//! domain errors. This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod region;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use region::{Place, RegionMembership, ServiceRegion};
pub use value_objects::*;
