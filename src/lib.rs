//! # PLZ Geocoder
//!
//! Resolves German postal codes (PLZ) to coordinates via Nominatim and
//! optionally reprojects them into UTM or Gauß-Krüger systems.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Value types and the geocoder port
//! - **Application Layer** ([`application`]) - Lookup orchestration
//! - **Infrastructure Layer** ([`infrastructure`]) - Nominatim client, cache, projections
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Lookup Pipeline
//!
//! 1. [`utils::normalize`] validates the raw input into a [`domain::entities::PostalCode`]
//! 2. [`infrastructure::cache::GeocodeCache`] answers from memory or asks the
//!    geocoder, with at most one upstream request per postal code in flight
//! 3. [`infrastructure::projection::project`] converts WGS84 to the target system
//! 4. [`application::services::LookupService`] ties the steps together
//!
//! ## Quick Start
//!
//! ```bash
//! export NOMINATIM_USER_AGENT="my-app (contact: me@example.com)"
//! cargo run
//! curl 'http://localhost:8080/api?plz=64283&coordsys=utm32'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod logging;
pub mod server;

pub mod routes;

pub use error::LookupError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LookupService;
    pub use crate::domain::Geocoder;
    pub use crate::domain::entities::{
        CoordinateSystem, GeoCoordinate, LookupResult, PostalCode, ProjectedCoordinate,
    };
    pub use crate::error::LookupError;
    pub use crate::infrastructure::cache::GeocodeCache;
    pub use crate::state::AppState;
}
