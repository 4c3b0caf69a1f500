//! Utility functions used across the application.
//!
//! - [`normalizer`] - Postal code validation and canonicalization

pub mod normalizer;

pub use normalizer::normalize;
