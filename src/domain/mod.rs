//! Domain layer: value types and the geocoder port.
//!
//! # Architecture
//!
//! - [`entities`] - Postal codes, coordinates, coordinate systems, lookup results
//! - [`geocoder`] - Trait implemented by upstream geocoding clients
//!
//! The domain layer has no dependencies on HTTP, caching or projection
//! libraries; those live in [`crate::infrastructure`].

pub mod entities;
pub mod geocoder;

pub use geocoder::Geocoder;

#[cfg(test)]
pub use geocoder::MockGeocoder;
