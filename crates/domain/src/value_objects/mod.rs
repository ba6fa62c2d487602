//! Value objects - immutable, self-validating types

pub mod geo_location;

pub use geo_location::{GeoLocation, InvalidCoordinates};
