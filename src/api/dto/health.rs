//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cache: CacheStatus,
}

/// Geocoding cache fill level.
#[derive(Debug, Serialize)]
pub struct CacheStatus {
    pub entries: usize,
    pub capacity: usize,
}
