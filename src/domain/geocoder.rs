//! Port for the upstream geocoding provider.

use crate::domain::entities::{GeoCoordinate, PostalCode};
use crate::error::LookupError;
use async_trait::async_trait;

/// Resolves a postal code to a WGS84 coordinate with one upstream call.
///
/// Implementations do no caching of their own; memoization and request
/// deduplication live in [`crate::infrastructure::cache::GeocodeCache`].
///
/// # Implementations
///
/// - [`crate::infrastructure::geocoding::NominatimGeocoder`] - OpenStreetMap Nominatim
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Looks up `code` at the provider.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(coordinate))` for the best match
    /// - `Ok(None)` if the provider has no result for the code
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::UpstreamTimeout`], [`LookupError::UpstreamUnavailable`]
    /// or [`LookupError::UpstreamUnexpected`] on transport or provider failure.
    async fn geocode(&self, code: &PostalCode) -> Result<Option<GeoCoordinate>, LookupError>;
}
