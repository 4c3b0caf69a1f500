//! Core domain entities of the lookup pipeline.
//!
//! Entities are plain value types without I/O:
//!
//! - [`PostalCode`] - A validated five-digit PLZ (cache key)
//! - [`GeoCoordinate`] - WGS84 latitude/longitude
//! - [`ProjectedCoordinate`] - Easting/northing in a projected system
//! - [`CoordinateSystem`] - Static registry of supported target systems
//! - [`LookupResult`] - Orchestrator output

pub mod coordinate;
pub mod coordinate_system;
pub mod lookup_result;
pub mod postal_code;

pub use coordinate::{GeoCoordinate, ProjectedCoordinate};
pub use coordinate_system::{CoordinateSystem, IDENTITY_KEY, ValidArea};
pub use lookup_result::LookupResult;
pub use postal_code::PostalCode;
