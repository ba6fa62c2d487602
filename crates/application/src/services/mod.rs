//! Application services - Use case implementations

mod itinerary_formatter;
mod journey_service;

pub use itinerary_formatter::format_itinerary;
pub use journey_service::JourneyService;
