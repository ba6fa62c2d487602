//! Digitransit integration for reittiopas
//!
//! Provides address geocoding via the [Digitransit](https://digitransit.fi)
//! geocoding API (Pelias) and itinerary planning via its GraphQL routing API
//! (OpenTripPlanner).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`GeocodingClient`] turns free text into [`domain::LocationCandidate`]s and is
//! implemented by [`DigitransitGeocodingClient`]. [`RoutingClient`] plans a single
//! [`domain::Itinerary`] between two points and is implemented by
//! [`DigitransitRoutingClient`]. Both take their endpoint and subscription key from
//! [`DigitransitConfig`].
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{DigitransitConfig, DigitransitRoutingClient, RoutingClient};
//!
//! let config = DigitransitConfig::default().with_api_key("my-key");
//! let client = DigitransitRoutingClient::new(&config)?;
//!
//! let from = GeoLocation::new(60.1992, 24.9339)?; // Pasila
//! let to = GeoLocation::new(60.1458, 24.9883)?;   // Suomenlinna
//! let itinerary = client.plan(&from, &to).await?;
//! ```

mod client;
mod config;
mod error;
mod geocoding;

pub use client::{DigitransitRoutingClient, RoutingClient};
pub use config::{DigitransitConfig, SUBSCRIPTION_KEY_PARAM};
pub use error::TransitError;
pub use geocoding::{DigitransitGeocodingClient, GeocodingClient, GeocodingError};
