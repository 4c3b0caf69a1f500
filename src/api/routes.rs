//! API route configuration.

use crate::api::handlers::{coordsys_handler, lookup_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public lookup routes.
///
/// # Endpoints
///
/// - `GET /api`           - Resolve a PLZ (`plz`, `coordsys` query parameters)
/// - `GET /api/coords`    - Same as `/api`, kept for older front ends
/// - `GET /api/coordsys`  - List supported coordinate systems
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(lookup_handler))
        .route("/api/coords", get(lookup_handler))
        .route("/api/coordsys", get(coordsys_handler))
}
