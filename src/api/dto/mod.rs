//! Data Transfer Objects for API requests and responses.

pub mod coordsys;
pub mod health;
pub mod lookup;

pub use coordsys::{CoordinateSystemItem, CoordinateSystemsResponse};
pub use health::{CacheStatus, HealthResponse};
pub use lookup::{LookupQuery, LookupResponse};
