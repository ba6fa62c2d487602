//! Digitransit geocoding client
//!
//! Resolves free-text addresses and place names to coordinates using the
//! [Digitransit address search](https://digitransit.fi/en/developers/apis/3-geocoding-api/address-search/)
//! endpoint (Pelias). Results are GeoJSON features, so coordinates arrive as
//! `[longitude, latitude]` and are handed on in that order.

use std::time::Duration;

use async_trait::async_trait;
use domain::entities::LocationCandidate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::config::{DigitransitConfig, SUBSCRIPTION_KEY_PARAM};

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Geocoding service answered with a non-success HTTP status
    #[error("HTTP error! Status: {status}")]
    Http {
        /// HTTP status code returned upstream
        status: u16,
    },

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Query rejected before sending (e.g. a result size of zero)
    #[error("Invalid geocoding query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,

    /// Client configuration rejected
    #[error("Geocoding configuration error: {0}")]
    Configuration(String),
}

impl GeocodingError {
    /// Upstream HTTP status that caused this error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Search for places matching `text`, returning at most `size` candidates
    ///
    /// An empty result is not an error.
    async fn search(
        &self,
        text: &str,
        size: u8,
    ) -> Result<Vec<LocationCandidate>, GeocodingError>;
}

/// Geocoding client for the Digitransit address search API
#[derive(Debug)]
pub struct DigitransitGeocodingClient {
    client: Client,
    config: DigitransitConfig,
}

impl DigitransitGeocodingClient {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &DigitransitConfig) -> Result<Self, GeocodingError> {
        config.validate().map_err(GeocodingError::Configuration)?;

        let mut builder =
            Client::builder().user_agent(concat!("reittiopas/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the raw search response into at most `size` candidates
    fn parse_search_response(
        body: &str,
        size: u8,
    ) -> Result<Vec<LocationCandidate>, GeocodingError> {
        let raw: RawSearchResponse =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        raw.features
            .into_iter()
            .take(usize::from(size))
            .map(Self::convert_feature)
            .collect()
    }

    /// Convert a raw GeoJSON feature into a candidate, keeping `[lon, lat]` order
    fn convert_feature(raw: RawFeature) -> Result<LocationCandidate, GeocodingError> {
        let coordinates = match raw.geometry.coordinates.as_slice() {
            [lon, lat, ..] => [*lon, *lat],
            _ => {
                return Err(GeocodingError::ParseError(
                    "feature geometry has fewer than two coordinates".to_string(),
                ));
            },
        };

        let props = raw.properties;
        Ok(LocationCandidate {
            id: props.id.unwrap_or_default(),
            name: props.name.unwrap_or_default(),
            confidence: props.confidence.unwrap_or_default(),
            accuracy: props.accuracy.unwrap_or_default(),
            neighbourhood: props.neighbourhood,
            label: props.label.unwrap_or_default(),
            coordinates,
        })
    }

    async fn fetch(
        &self,
        text: &str,
        size: u8,
    ) -> Result<Vec<LocationCandidate>, GeocodingError> {
        if size == 0 {
            return Err(GeocodingError::InvalidQuery(
                "size must be at least 1".to_string(),
            ));
        }

        let url = self.config.geocoding_url();
        let params = [
            ("text", text.to_string()),
            ("size", size.to_string()),
            (SUBSCRIPTION_KEY_PARAM, self.config.api_key_value().to_string()),
        ];

        debug!(?url, "Searching addresses");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodingError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let candidates = Self::parse_search_response(&body, size)?;
        debug!(count = candidates.len(), "Address candidates found");
        Ok(candidates)
    }
}

#[async_trait]
impl GeocodingClient for DigitransitGeocodingClient {
    #[instrument(skip(self))]
    async fn search(
        &self,
        text: &str,
        size: u8,
    ) -> Result<Vec<LocationCandidate>, GeocodingError> {
        self.fetch(text, size)
            .await
            .inspect_err(|e| error!(error = %e, "Error in address search"))
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawSearchResponse {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawGeometry,
    #[serde(default)]
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProperties {
    id: Option<String>,
    name: Option<String>,
    confidence: Option<f64>,
    accuracy: Option<String>,
    neighbourhood: Option<String>,
    label: Option<String>,
}
