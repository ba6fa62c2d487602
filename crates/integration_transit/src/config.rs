//! Digitransit client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

/// Header (and query parameter) carrying the Digitransit subscription key
pub const SUBSCRIPTION_KEY_PARAM: &str = "digitransit-subscription-key";

/// Configuration shared by the Digitransit geocoding and routing clients
#[derive(Clone, Serialize, Deserialize)]
pub struct DigitransitConfig {
    /// Base URL of the Digitransit API gateway
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Router (region) used for itinerary planning, e.g. "hsl" or "finland"
    #[serde(default = "default_router")]
    pub router: String,

    /// Subscription key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds (unset = wait indefinitely)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for DigitransitConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitransitConfig")
            .field("base_url", &self.base_url)
            .field("router", &self.router)
            .field(
                "api_key",
                &if self.api_key.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://api.digitransit.fi".to_string()
}

fn default_router() -> String {
    "hsl".to_string()
}

impl Default for DigitransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            router: default_router(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl DigitransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: Some(5),
            ..Default::default()
        }
    }

    /// Set the subscription key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Subscription key as sent upstream (empty when not configured)
    #[must_use]
    pub fn api_key_value(&self) -> &str {
        self.api_key
            .as_ref()
            .map_or("", |key| key.expose_secret())
    }

    /// Full URL of the address search endpoint
    #[must_use]
    pub fn geocoding_url(&self) -> String {
        format!("{}/geocoding/v1/search", self.base_url.trim_end_matches('/'))
    }

    /// Full URL of the GraphQL endpoint for the configured router
    #[must_use]
    pub fn routing_url(&self) -> String {
        format!(
            "{}/routing/v1/routers/{}/index/graphql",
            self.base_url.trim_end_matches('/'),
            self.router
        )
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        Url::parse(&self.base_url).map_err(|e| format!("base_url is not a valid URL: {e}"))?;

        if self.router.trim().is_empty() {
            return Err("router must not be empty".to_string());
        }

        if self.timeout_secs == Some(0) {
            return Err("timeout_secs must be greater than 0 when set".to_string());
        }

        Ok(())
    }
}
