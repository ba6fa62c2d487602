//! Journey planning service
//!
//! Resolves the two addresses given by the user and plans an itinerary
//! between the best match of each. Every upstream call is awaited before the
//! next one starts.

use std::sync::Arc;

use domain::entities::{Itinerary, LocationCandidate};
use domain::value_objects::GeoLocation;
use tracing::{debug, error, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{AddressSearchPort, DEFAULT_SEARCH_SIZE, ItineraryPort};

/// Service orchestrating address resolution and itinerary planning
pub struct JourneyService {
    address_search: Arc<dyn AddressSearchPort>,
    planner: Arc<dyn ItineraryPort>,
}

impl std::fmt::Debug for JourneyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JourneyService").finish_non_exhaustive()
    }
}

impl JourneyService {
    /// Create a new journey service
    #[must_use]
    pub fn new(
        address_search: Arc<dyn AddressSearchPort>,
        planner: Arc<dyn ItineraryPort>,
    ) -> Self {
        Self {
            address_search,
            planner,
        }
    }

    /// Plan a journey between two free-text addresses
    ///
    /// # Errors
    ///
    /// Returns `AddressNotFound` if either address has no match (the planner
    /// is not called in that case), or the error of the failing upstream call.
    #[instrument(skip(self))]
    pub async fn plan_journey(
        &self,
        from_text: &str,
        to_text: &str,
    ) -> Result<Itinerary, ApplicationError> {
        let from_candidates = self
            .address_search
            .search(from_text, DEFAULT_SEARCH_SIZE)
            .await?;
        let to_candidates = self
            .address_search
            .search(to_text, DEFAULT_SEARCH_SIZE)
            .await?;

        let (from, to) = match (from_candidates.first(), to_candidates.first()) {
            (Some(from), Some(to)) => (from, to),
            (None, _) => {
                error!(address = from_text, "One or both addresses not found");
                return Err(ApplicationError::AddressNotFound(from_text.to_string()));
            },
            (_, None) => {
                error!(address = to_text, "One or both addresses not found");
                return Err(ApplicationError::AddressNotFound(to_text.to_string()));
            },
        };

        let from_location = Self::location_of(from)?;
        let to_location = Self::location_of(to)?;

        info!(
            from = %from.label,
            to = %to.label,
            distance_km = from_location.distance_km(&to_location),
            "Addresses resolved"
        );

        let itinerary = self.planner.plan(&from_location, &to_location).await?;
        info!(
            legs = itinerary.legs.len(),
            transfers = itinerary.transfers(),
            duration_min = itinerary.duration_minutes(),
            "Itinerary received"
        );
        for leg in &itinerary.legs {
            debug!(
                mode = %leg.mode,
                route = leg.route_name().unwrap_or("-"),
                from = %leg.from,
                to = %leg.to,
                "Leg"
            );
        }
        Ok(itinerary)
    }

    fn location_of(candidate: &LocationCandidate) -> Result<GeoLocation, ApplicationError> {
        candidate.location().map_err(|e| {
            error!(label = %candidate.label, error = %e, "Candidate has invalid coordinates");
            ApplicationError::from(e)
        })
    }
}
