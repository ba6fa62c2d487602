//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the
//! Digitransit clients, and loads the application configuration.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, LogFormat, LoggingConfig};
