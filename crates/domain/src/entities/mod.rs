//! Domain entities

pub mod itinerary;
pub mod location_candidate;

pub use itinerary::{Itinerary, Leg, Place, RouteInfo, TravelMode};
pub use location_candidate::LocationCandidate;
