//! Itinerary entity
//!
//! One planned journey: an ordered list of legs, each with its origin,
//! destination, timing and travel mode.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A complete journey from origin to destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Departure time of the first leg
    pub start_time: DateTime<Utc>,
    /// Arrival time of the last leg
    pub end_time: DateTime<Utc>,
    /// Total time spent walking, in seconds
    pub walk_time_secs: u64,
    /// Total walking distance in meters
    pub walk_distance_m: f64,
    /// Legs in journey order
    pub legs: Vec<Leg>,
}

impl Itinerary {
    /// Total travel duration in minutes
    #[must_use]
    pub fn duration_minutes(&self) -> u64 {
        (self.end_time - self.start_time).num_minutes().unsigned_abs()
    }

    /// Legs served by a scheduled transit service
    pub fn transit_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter().filter(|leg| leg.mode.is_transit())
    }

    /// Number of transfers between transit legs
    #[must_use]
    pub fn transfers(&self) -> usize {
        self.transit_legs().count().saturating_sub(1)
    }

    /// Where the journey effectively starts
    ///
    /// The boarding point of the first transit leg. Without transit legs this is
    /// the origin of the first leg.
    #[must_use]
    pub fn start_place(&self) -> Option<&Place> {
        self.transit_legs()
            .next()
            .or_else(|| self.legs.first())
            .map(|leg| &leg.from)
    }

    /// Where the journey effectively ends
    ///
    /// The alighting point of the last transit leg. Without transit legs this is
    /// the destination of the last leg.
    #[must_use]
    pub fn end_place(&self) -> Option<&Place> {
        self.transit_legs()
            .last()
            .or_else(|| self.legs.last())
            .map(|leg| &leg.to)
    }
}

/// A single uninterrupted segment of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Where the leg starts
    pub from: Place,
    /// Where the leg ends
    pub to: Place,
    /// Departure time
    pub start_time: DateTime<Utc>,
    /// Arrival time
    pub end_time: DateTime<Utc>,
    /// How this leg is travelled
    pub mode: TravelMode,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Distance in meters
    pub distance_m: f64,
    /// Route identifiers (transit legs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteInfo>,
}

impl Leg {
    /// Route short name, falling back to the long name
    #[must_use]
    pub fn route_name(&self) -> Option<&str> {
        self.route.as_ref().and_then(|route| {
            route
                .short_name
                .as_deref()
                .or(route.long_name.as_deref())
        })
    }
}

/// A named point on an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Stop or address name
    pub name: String,
    /// Coordinates
    pub location: GeoLocation,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Identifiers of the transit route serving a leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Line number or code (e.g. "550", "M1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Descriptive name (e.g. "Itäkeskus-Westendinasema")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
}

/// Travel mode of a leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    /// On foot
    Walk,
    /// Bicycle
    Bicycle,
    /// Private car
    Car,
    /// Bus
    Bus,
    /// Tram
    Tram,
    /// Commuter or long-distance train
    Rail,
    /// Metro
    Subway,
    /// Ferry
    Ferry,
    /// Airplane
    Airplane,
    /// Cable car
    CableCar,
    /// Funicular
    Funicular,
    /// Gondola lift
    Gondola,
    /// Anything the router reports that is not listed above
    Unknown,
}

impl TravelMode {
    /// Map a router mode string (e.g. `"BUS"`) to a travel mode
    #[must_use]
    pub fn from_api(mode: &str) -> Self {
        match mode {
            "WALK" => Self::Walk,
            "BICYCLE" => Self::Bicycle,
            "CAR" => Self::Car,
            "BUS" => Self::Bus,
            "TRAM" => Self::Tram,
            "RAIL" => Self::Rail,
            "SUBWAY" => Self::Subway,
            "FERRY" => Self::Ferry,
            "AIRPLANE" => Self::Airplane,
            "CABLE_CAR" => Self::CableCar,
            "FUNICULAR" => Self::Funicular,
            "GONDOLA" => Self::Gondola,
            _ => Self::Unknown,
        }
    }

    /// Whether this mode is a scheduled transit service
    #[must_use]
    pub const fn is_transit(&self) -> bool {
        !matches!(self, Self::Walk | Self::Bicycle | Self::Car)
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Walk => "Walk",
            Self::Bicycle => "Bicycle",
            Self::Car => "Car",
            Self::Bus => "Bus",
            Self::Tram => "Tram",
            Self::Rail => "Train",
            Self::Subway => "Metro",
            Self::Ferry => "Ferry",
            Self::Airplane => "Airplane",
            Self::CableCar => "Cable car",
            Self::Funicular => "Funicular",
            Self::Gondola => "Gondola",
            Self::Unknown => "Transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
