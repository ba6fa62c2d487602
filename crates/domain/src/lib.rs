//! Domain layer for reittiopas
//!
//! Locations, candidates and itineraries as the rest of the workspace sees them.
//! Nothing in here knows about HTTP or the wire formats of the upstream APIs.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
