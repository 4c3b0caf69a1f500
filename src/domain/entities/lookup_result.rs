//! Output of a completed lookup.

use super::coordinate::{GeoCoordinate, ProjectedCoordinate};
use super::coordinate_system::CoordinateSystem;
use super::postal_code::PostalCode;

/// A resolved postal code, optionally expressed in a projected system.
///
/// `projected` is `Some` exactly when `system` is not the identity system.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub postal_code: PostalCode,
    pub coordinate: GeoCoordinate,
    pub system: &'static CoordinateSystem,
    pub projected: Option<ProjectedCoordinate>,
}
