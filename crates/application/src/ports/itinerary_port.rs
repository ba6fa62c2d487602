//! Itinerary planning port
//!
//! Defines the interface for planning a journey between two coordinate points.

use async_trait::async_trait;
use domain::entities::Itinerary;
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for itinerary planning
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItineraryPort: Send + Sync {
    /// Plan one itinerary from `from` to `to`
    async fn plan(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Itinerary, ApplicationError>;
}
