//! Address search port
//!
//! Resolves free text to candidate locations.

use async_trait::async_trait;
use domain::entities::LocationCandidate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Number of candidates requested per address; the best match is used
pub const DEFAULT_SEARCH_SIZE: u8 = 1;

/// Port for address and place name lookup
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AddressSearchPort: Send + Sync {
    /// Return at most `size` candidates matching `text`, best match first
    ///
    /// No match is an empty list, not an error.
    async fn search(
        &self,
        text: &str,
        size: u8,
    ) -> Result<Vec<LocationCandidate>, ApplicationError>;
}
