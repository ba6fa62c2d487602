//! Application layer - Use cases and orchestration
//!
//! Contains the journey planning use case, the ports it depends on and the
//! console presentation of an itinerary. Adapters in the infrastructure layer
//! implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
