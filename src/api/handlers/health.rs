//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::{CacheStatus, HealthResponse};
use crate::state::AppState;

/// Returns service health with the geocoding cache fill level.
///
/// # Endpoint
///
/// `GET /health`
///
/// The upstream provider is not probed; its rate limit is shared with real
/// lookups.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "cache": { "entries": 12, "capacity": 2048 }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let cache = state.lookup_service.cache();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache: CacheStatus {
            entries: cache.len(),
            capacity: cache.capacity(),
        },
    })
}
