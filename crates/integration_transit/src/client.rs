//! Digitransit routing client
//!
//! Plans itineraries through the OpenTripPlanner GraphQL endpoint of the
//! [Digitransit routing API](https://digitransit.fi/en/developers/apis/1-routing-api/).
//! The request asks for exactly one itinerary and the first one returned is used.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::{Itinerary, Leg, Place, RouteInfo, TravelMode};
use domain::value_objects::GeoLocation;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::config::{DigitransitConfig, SUBSCRIPTION_KEY_PARAM};
use crate::error::TransitError;

/// Trait for itinerary planning clients
#[async_trait]
pub trait RoutingClient: Send + Sync {
    /// Plan a single itinerary between two points
    async fn plan(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Itinerary, TransitError>;
}

/// Routing client for the Digitransit GraphQL API
#[derive(Debug)]
pub struct DigitransitRoutingClient {
    client: Client,
    config: DigitransitConfig,
}

impl DigitransitRoutingClient {
    /// Create a new routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &DigitransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::ConfigurationError)?;

        let mut builder =
            Client::builder().user_agent(concat!("reittiopas/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Build the GraphQL `plan` query for one itinerary between two points
    fn plan_query(from: &GeoLocation, to: &GeoLocation) -> String {
        format!(
            r"{{
  plan(
    from: {{ lat: {from_lat}, lon: {from_lon} }}
    to: {{ lat: {to_lat}, lon: {to_lon} }}
    numItineraries: 1
  ) {{
    itineraries {{
      startTime
      endTime
      walkTime
      walkDistance
      legs {{
        from {{ name lat lon }}
        to {{ name lat lon }}
        startTime
        endTime
        mode
        duration
        distance
        route {{ shortName longName }}
      }}
    }}
  }}
}}",
            from_lat = from.latitude(),
            from_lon = from.longitude(),
            to_lat = to.latitude(),
            to_lon = to.longitude(),
        )
    }

    /// Parse the raw GraphQL response and pick the first itinerary
    fn parse_plan_response(
        body: &str,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Itinerary, TransitError> {
        let raw: Option<RawRoutingResponse> =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        let Some(raw) = raw else {
            return Err(TransitError::InvalidResponse("empty response body".to_string()));
        };

        let messages: Vec<&str> = raw.errors.iter().map(|e| e.message.as_str()).collect();

        let Some(data) = raw.data else {
            let detail = if messages.is_empty() {
                "missing data".to_string()
            } else {
                messages.join("; ")
            };
            return Err(TransitError::InvalidResponse(detail));
        };

        if !messages.is_empty() {
            warn!(errors = ?messages, "Routing response contained GraphQL errors");
        }

        let plan = data
            .plan
            .ok_or_else(|| TransitError::InvalidResponse("missing data.plan".to_string()))?;

        let first = plan.itineraries.into_iter().next().ok_or_else(|| {
            TransitError::NoItineraryFound {
                from: from.to_string(),
                to: to.to_string(),
            }
        })?;

        Self::convert_itinerary(first)
    }

    /// Convert a raw itinerary to a typed itinerary
    fn convert_itinerary(raw: RawItinerary) -> Result<Itinerary, TransitError> {
        let legs = raw
            .legs
            .into_iter()
            .map(Self::convert_leg)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Itinerary {
            start_time: timestamp(raw.start_time)?,
            end_time: timestamp(raw.end_time)?,
            walk_time_secs: raw.walk_time.unwrap_or_default(),
            walk_distance_m: raw.walk_distance.unwrap_or_default(),
            legs,
        })
    }

    /// Convert a raw leg to a typed leg
    fn convert_leg(raw: RawLeg) -> Result<Leg, TransitError> {
        Ok(Leg {
            from: Self::convert_place(raw.from)?,
            to: Self::convert_place(raw.to)?,
            start_time: timestamp(raw.start_time)?,
            end_time: timestamp(raw.end_time)?,
            mode: raw
                .mode
                .as_deref()
                .map_or(TravelMode::Unknown, TravelMode::from_api),
            duration_secs: raw.duration.unwrap_or_default(),
            distance_m: raw.distance.unwrap_or_default(),
            route: raw.route.map(|route| RouteInfo {
                short_name: route.short_name,
                long_name: route.long_name,
            }),
        })
    }

    /// Convert a raw place to a typed place
    fn convert_place(raw: RawPlace) -> Result<Place, TransitError> {
        let location = GeoLocation::new(raw.lat, raw.lon)
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        Ok(Place {
            name: raw.name.unwrap_or_default(),
            location,
        })
    }

    async fn fetch(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Itinerary, TransitError> {
        let url = self.config.routing_url();

        debug!(?url, "Planning itinerary");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/graphql")
            .header(SUBSCRIPTION_KEY_PARAM, self.config.api_key_value())
            .body(Self::plan_query(from, to))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs.unwrap_or_default(),
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransitError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let itinerary = Self::parse_plan_response(&body, from, to)?;
        debug!(
            legs = itinerary.legs.len(),
            duration_min = itinerary.duration_minutes(),
            "Itinerary planned"
        );
        Ok(itinerary)
    }
}

#[async_trait]
impl RoutingClient for DigitransitRoutingClient {
    #[instrument(skip_all, fields(from = %from, to = %to))]
    async fn plan(
        &self,
        from: &GeoLocation,
        to: &GeoLocation,
    ) -> Result<Itinerary, TransitError> {
        self.fetch(from, to)
            .await
            .inspect_err(|e| error!(error = %e, "Error in itinerary planning"))
    }
}

/// Convert epoch milliseconds (OTP's time format) into a UTC instant
fn timestamp(millis: i64) -> Result<DateTime<Utc>, TransitError> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| TransitError::ParseError(format!("timestamp out of range: {millis}")))
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRoutingResponse {
    data: Option<RawData>,
    #[serde(default)]
    errors: Vec<RawGraphQlError>,
}

#[derive(Debug, Deserialize)]
struct RawGraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct RawData {
    plan: Option<RawPlan>,
}

#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    itineraries: Vec<RawItinerary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItinerary {
    start_time: i64,
    end_time: i64,
    walk_time: Option<u64>,
    walk_distance: Option<f64>,
    #[serde(default)]
    legs: Vec<RawLeg>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    from: RawPlace,
    to: RawPlace,
    start_time: i64,
    end_time: i64,
    mode: Option<String>,
    duration: Option<f64>,
    distance: Option<f64>,
    route: Option<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    name: Option<String>,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    short_name: Option<String>,
    long_name: Option<String>,
}
