//! Coordinate value types.

use serde::Serialize;

/// A WGS84 (EPSG:4326) position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A position in a projected system, in that system's native units.
///
/// `x` is always the easting and `y` the northing, whatever axis order the
/// target system declares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedCoordinate {
    pub x: f64,
    pub y: f64,
}
