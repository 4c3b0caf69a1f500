//! Caching layer in front of the upstream geocoder.
//!
//! Provides [`GeocodeCache`], an in-process LRU memo with per-key request
//! deduplication (single-flight).

mod geocode_cache;

pub use geocode_cache::GeocodeCache;
