//! Digitransit adapter - Implements `AddressSearchPort` and `ItineraryPort`
//! using `integration_transit`

use application::error::ApplicationError;
use application::ports::{AddressSearchPort, ItineraryPort};
use async_trait::async_trait;
use domain::entities::{Itinerary, LocationCandidate};
use domain::value_objects::GeoLocation;
use integration_transit::{
    DigitransitConfig, DigitransitGeocodingClient, DigitransitRoutingClient, GeocodingClient,
    GeocodingError, RoutingClient, TransitError,
};
use tracing::{debug, instrument, warn};

const GEOCODING_SERVICE: &str = "geocoding";
const ROUTING_SERVICE: &str = "routing";

/// Adapter for the Digitransit geocoding and routing APIs
pub struct DigitransitAdapter {
    geocoding_client: DigitransitGeocodingClient,
    routing_client: DigitransitRoutingClient,
}

impl std::fmt::Debug for DigitransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitransitAdapter")
            .field("geocoding_client", &"DigitransitGeocodingClient")
            .field("routing_client", &"DigitransitRoutingClient")
            .finish()
    }
}

impl DigitransitAdapter {
    /// Create a new adapter from pre-built clients
    #[must_use]
    pub const fn new(
        geocoding_client: DigitransitGeocodingClient,
        routing_client: DigitransitRoutingClient,
    ) -> Self {
        Self {
            geocoding_client,
            routing_client,
        }
    }

    /// Build both clients from one configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients fail to initialize.
    pub fn from_config(config: &DigitransitConfig) -> Result<Self, ApplicationError> {
        if config.api_key_value().is_empty() {
            warn!("No Digitransit subscription key configured; requests will likely be rejected");
        }

        let geocoding_client =
            DigitransitGeocodingClient::new(config).map_err(map_geocoding_error)?;
        let routing_client = DigitransitRoutingClient::new(config).map_err(map_routing_error)?;

        debug!(base_url = %config.base_url, router = %config.router, "Digitransit adapter ready");
        Ok(Self::new(geocoding_client, routing_client))
    }
}

/// Convert a geocoding error into an application error
fn map_geocoding_error(err: GeocodingError) -> ApplicationError {
    match err {
        GeocodingError::Http { status } => ApplicationError::Upstream {
            service: GEOCODING_SERVICE,
            status,
        },
        GeocodingError::ParseError(msg) => ApplicationError::InvalidResponse(msg),
        GeocodingError::Configuration(msg) => ApplicationError::Configuration(msg),
        other @ (GeocodingError::ConnectionFailed(_)
        | GeocodingError::InvalidQuery(_)
        | GeocodingError::Timeout) => {
            ApplicationError::ExternalService(format!("Address search failed: {other}"))
        },
    }
}

/// Convert a routing error into an application error
fn map_routing_error(err: TransitError) -> ApplicationError {
    match err {
        TransitError::Http { status } => ApplicationError::Upstream {
            service: ROUTING_SERVICE,
            status,
        },
        TransitError::InvalidResponse(msg) | TransitError::ParseError(msg) => {
            ApplicationError::InvalidResponse(msg)
        },
        TransitError::NoItineraryFound { from, to } => {
            ApplicationError::NoItinerary(format!("from {from} to {to}"))
        },
        TransitError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        other @ (TransitError::ConnectionFailed(_) | TransitError::Timeout { .. }) => {
            ApplicationError::ExternalService(format!("Itinerary planning failed: {other}"))
        },
    }
}

#[async_trait]
impl AddressSearchPort for DigitransitAdapter {
    #[instrument(skip(self))]
    async fn search(
        &self,
        text: &str,
        size: u8,
    ) -> Result<Vec<LocationCandidate>, ApplicationError> {
        self.geocoding_client
            .search(text, size)
            .await
            .map_err(map_geocoding_error)
    }
}

#[async_trait]
impl ItineraryPort for DigitransitAdapter {
    #[instrument(skip_all)]
    async fn plan(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Itinerary, ApplicationError> {
        self.routing_client
            .plan(from, to)
            .await
            .map_err(map_routing_error)
    }
}
