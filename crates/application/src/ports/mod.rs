//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod address_search_port;
mod itinerary_port;

pub use address_search_port::{AddressSearchPort, DEFAULT_SEARCH_SIZE};
#[cfg(test)]
pub use address_search_port::MockAddressSearchPort;
pub use itinerary_port::ItineraryPort;
#[cfg(test)]
pub use itinerary_port::MockItineraryPort;
