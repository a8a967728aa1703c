//! Geocoding backends
//!
//! Turns a free-text query into candidate address records.

mod error;
mod photon;

pub use error::FetchError;
pub use photon::PhotonGeocoder;

use crate::address::RawCandidate;
use async_trait::async_trait;

/// Trait for forward geocoders
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Backend name
    fn name(&self) -> &str;

    /// Fetch candidates for a non-empty query
    async fn fetch(&self, query: &str) -> Result<Vec<RawCandidate>, FetchError>;
}
