//! Place search provider abstraction
//!
//! The engine only ever talks to `PlaceSource`; everything about API keys,
//! rate limits, and HTTP lives behind it.

mod error;
mod google;
mod types;

pub use error::{PlacesError, PlacesErrorKind};
pub use google::GoogleMapsService;
pub use types::{Coordinate, Place};

use async_trait::async_trait;

/// Common interface for place search providers
#[async_trait]
pub trait PlaceSource: Send + Sync {
    /// Search for places of `category` within `radius_m` of `origin`.
    /// Returns unfiltered candidates; rating/open-now/cuisine filtering is
    /// the caller's concern.
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesError>;

    /// Resolve free text to a coordinate. `Ok(None)` means nothing matched;
    /// when multiple candidates match, the first one wins.
    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, PlacesError>;
}

#[async_trait]
impl<T: PlaceSource + ?Sized> PlaceSource for std::sync::Arc<T> {
    async fn nearby_search(
        &self,
        origin: Coordinate,
        radius_m: u32,
        category: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        (**self).nearby_search(origin, radius_m, category).await
    }

    async fn geocode(&self, query: &str) -> Result<Option<Coordinate>, PlacesError> {
        (**self).geocode(query).await
    }
}
