//! Business logic services for the application layer.

pub mod lookup_service;

pub use lookup_service::LookupService;
