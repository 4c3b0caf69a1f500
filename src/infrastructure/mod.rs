//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces defined by the domain layer and wraps
//! third-party libraries.
//!
//! # Modules
//!
//! - [`cache`] - Bounded, single-flight geocoding cache
//! - [`geocoding`] - Nominatim HTTP client
//! - [`projection`] - `proj4rs` coordinate transforms

pub mod cache;
pub mod geocoding;
pub mod projection;
