//! Handler for PLZ lookups.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::{info, warn};

use crate::api::dto::{LookupQuery, LookupResponse};
use crate::error::LookupError;
use crate::state::AppState;

const MALFORMED_QUERY: &str = "Ungültige Anfrage. Erwartet: plz=<5 Ziffern>&coordsys=<System>.";

/// Resolves a postal code to coordinates, optionally projected.
///
/// # Endpoint
///
/// `GET /api?plz=64283&coordsys=utm32` (also served at `/api/coords`)
///
/// # Response Codes
///
/// - **200 OK**: `{"ok": true, "plz", "latitude", "longitude", "coordsys", "coordsys_name"[, "x", "y"]}`
/// - **400 Bad Request**: malformed PLZ or projection failure
/// - **404 Not Found**: no location for the PLZ
/// - **503 Service Unavailable**: geocoding provider timed out or failed
///
/// Error bodies are `{"ok": false, "error": "<message>"}`.
///
/// An unknown or missing `coordsys` selects `latlon`. A query string that
/// cannot be decoded (e.g. a repeated `plz`) is reported as invalid input.
pub async fn lookup_handler(
    State(state): State<AppState>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<LookupResponse>, LookupError> {
    let Query(query) = query.map_err(|rejection| {
        info!(error = %rejection.body_text(), "Lookup rejected: malformed query string");
        LookupError::invalid_input(MALFORMED_QUERY)
    })?;
    let raw_code = query.plz.as_deref().unwrap_or_default();
    let coordsys = query.coordsys.as_deref().unwrap_or_default();

    match state.lookup_service.lookup(raw_code, coordsys).await {
        Ok(result) => {
            info!(plz = %result.postal_code, coordsys = result.system.key, "Lookup ok");
            Ok(Json(result.into()))
        }
        Err(e) => {
            if e.is_transient() {
                warn!(kind = e.kind(), "Lookup failed: {}", e);
            } else {
                info!(kind = e.kind(), "Lookup rejected: {}", e);
            }
            Err(e)
        }
    }
}
