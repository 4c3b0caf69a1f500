//! PLZ lookup orchestration.

use std::sync::Arc;

use crate::domain::entities::{CoordinateSystem, LookupResult};
use crate::error::LookupError;
use crate::infrastructure::cache::GeocodeCache;
use crate::infrastructure::projection::project;
use crate::utils::normalize;
use tracing::debug;

/// Service turning a raw postal code and a coordinate system key into a
/// [`LookupResult`].
///
/// Holds no state of its own beyond the shared [`GeocodeCache`].
pub struct LookupService {
    cache: Arc<GeocodeCache>,
}

impl LookupService {
    /// Creates a new lookup service.
    pub fn new(cache: Arc<GeocodeCache>) -> Self {
        Self { cache }
    }

    /// Resolves `raw_code` and expresses it in the system named by `coordsys_key`.
    ///
    /// # Flow
    ///
    /// 1. Normalize the postal code (no upstream contact on failure)
    /// 2. Select the coordinate system; unknown keys fall back to `latlon`
    /// 3. Resolve through the cache
    /// 4. Project unless the selected system is the identity
    ///
    /// # Errors
    ///
    /// - [`LookupError::InvalidInput`] if the postal code is malformed
    /// - [`LookupError::NotFound`] if the provider has no location for it
    /// - Upstream errors from [`GeocodeCache::resolve`], unchanged
    /// - [`LookupError::Projection`] if the coordinate cannot be expressed in
    ///   the selected system; there is no fallback to another system
    pub async fn lookup(
        &self,
        raw_code: &str,
        coordsys_key: &str,
    ) -> Result<LookupResult, LookupError> {
        let postal_code = normalize(raw_code)?;
        let system = CoordinateSystem::find_or_identity(coordsys_key);

        let coordinate = self
            .cache
            .resolve(&postal_code)
            .await?
            .ok_or_else(|| LookupError::not_found(postal_code.as_str()))?;

        let projected = if system.is_identity() {
            None
        } else {
            Some(project(&coordinate, system)?)
        };

        debug!(
            plz = %postal_code,
            coordsys = system.key,
            lat = coordinate.latitude,
            lon = coordinate.longitude,
            "Lookup resolved"
        );

        Ok(LookupResult {
            postal_code,
            coordinate,
            system,
            projected,
        })
    }

    /// The cache backing this service, for health reporting.
    pub fn cache(&self) -> &GeocodeCache {
        &self.cache
    }
}
