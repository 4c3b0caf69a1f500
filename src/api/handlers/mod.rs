//! HTTP request handlers for API endpoints.

pub mod coordsys;
pub mod health;
pub mod lookup;

pub use coordsys::coordsys_handler;
pub use health::health_handler;
pub use lookup::lookup_handler;
