//! Application configuration
//!
//! Layered, lowest precedence first:
//! - serde defaults
//! - `reittiopas.toml` in the working directory (optional)
//! - `REITTIOPAS_<SECTION>__<KEY>` environment variables
//! - `DIGITRANSIT_API_KEY` for the subscription key

mod logging;

use application::ApplicationError;
use config::{ConfigError, Environment, File, Source};
use integration_transit::DigitransitConfig;
use serde::{Deserialize, Serialize};

pub use logging::{LogFormat, LoggingConfig};

/// Base name of the optional configuration file
const CONFIG_FILE: &str = "reittiopas";

/// Prefix of environment variable overrides
const ENV_PREFIX: &str = "REITTIOPAS";

/// Environment variable holding the Digitransit subscription key
pub const API_KEY_ENV: &str = "DIGITRANSIT_API_KEY";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Digitransit API settings
    #[serde(default)]
    pub digitransit: DigitransitConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            File::with_name(CONFIG_FILE).required(false),
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    /// Load configuration from an explicit file source and subscription key
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong type.
    pub fn load_from<S>(file: S, api_key: Option<String>) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            // e.g. REITTIOPAS_DIGITRANSIT__BASE_URL
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("digitransit.api_key", api_key)?
            .build()?
            .try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.digitransit
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("digitransit: {e}")))
    }
}
