//! Geocoding candidate entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoLocation, InvalidCoordinates};

/// A place the geocoder matched against a free-text query
///
/// `coordinates` keep the geocoder's GeoJSON order, `[longitude, latitude]`.
/// Use [`LocationCandidate::location`] to get a latitude-first [`GeoLocation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    /// Geocoder-specific identifier (e.g. `node:123` or an OSM id)
    pub id: String,
    /// Short name of the place
    pub name: String,
    /// Match confidence reported by the geocoder (0.0 - 1.0)
    pub confidence: f64,
    /// Accuracy classification (e.g. `point`, `centroid`)
    pub accuracy: String,
    /// Neighbourhood, when the geocoder knows one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    /// Human-readable label (name, street, city)
    pub label: String,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

impl LocationCandidate {
    /// Longitude of the candidate
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude of the candidate
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }

    /// Convert the `[lon, lat]` pair into a validated [`GeoLocation`]
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if the geocoder produced an out-of-range pair.
    pub fn location(&self) -> Result<GeoLocation, InvalidCoordinates> {
        GeoLocation::from_lon_lat(self.coordinates)
    }
}
