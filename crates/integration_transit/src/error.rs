//! Routing error types

use thiserror::Error;

/// Errors that can occur while planning an itinerary
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Routing service answered with a non-success HTTP status
    #[error("HTTP error! Status: {status}")]
    Http {
        /// HTTP status code returned upstream
        status: u16,
    },

    /// Response parsed but lacks the expected `data.plan` structure
    #[error("Invalid API response format: {0}")]
    InvalidResponse(String),

    /// Failed to parse response from routing service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Router returned no itinerary between the two points
    #[error("No itinerary found from {from} to {to}")]
    NoItineraryFound {
        /// Origin coordinates
        from: String,
        /// Destination coordinates
        to: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    /// Upstream HTTP status that caused this error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}
