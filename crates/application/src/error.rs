//! Application-level errors

use domain::InvalidCoordinates;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// An upstream API answered with a non-success HTTP status
    #[error("{service} request failed: HTTP error! Status: {status}")]
    Upstream {
        /// Which upstream service failed ("geocoding" or "routing")
        service: &'static str,
        /// Original HTTP status code
        status: u16,
    },

    /// Upstream answered but the payload lacked the expected structure
    #[error("Invalid API response format: {0}")]
    InvalidResponse(String),

    /// Address search returned no candidates for the given text
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// Router found no itinerary between the two points
    #[error("No itinerary found: {0}")]
    NoItinerary(String),

    /// Resolved coordinates are outside the valid range
    #[error(transparent)]
    InvalidCoordinates(#[from] InvalidCoordinates),

    /// External service error (transport, timeout, parsing)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Upstream HTTP status that caused this error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}
