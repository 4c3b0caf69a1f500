//! Handler listing the supported coordinate systems.

use axum::Json;

use crate::api::dto::CoordinateSystemsResponse;

/// Lists the coordinate system registry.
///
/// # Endpoint
///
/// `GET /api/coordsys`
///
/// # Response
///
/// ```json
/// {
///   "ok": true,
///   "default": "latlon",
///   "systems": [
///     { "key": "latlon", "name": "WGS84 (Lat/Lon)", "epsg": "EPSG:4326" },
///     { "key": "utm32", "name": "ETRS89 / UTM Zone 32N", "epsg": "EPSG:25832" }
///   ]
/// }
/// ```
pub async fn coordsys_handler() -> Json<CoordinateSystemsResponse> {
    Json(CoordinateSystemsResponse::from_registry())
}
