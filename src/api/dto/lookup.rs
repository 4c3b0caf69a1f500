//! DTOs for the lookup endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::entities::LookupResult;

/// Query parameters of `GET /api`.
///
/// Both fields are optional at the HTTP level: a missing `plz` is reported
/// as invalid input, a missing `coordsys` selects `latlon`.
#[derive(Debug, Default, Deserialize)]
pub struct LookupQuery {
    pub plz: Option<String>,
    pub coordsys: Option<String>,
}

/// Successful lookup response.
///
/// `x` and `y` are present only for projected systems.
#[derive(Debug, Serialize)]
pub struct LookupResponse {
    pub ok: bool,
    pub plz: String,
    pub latitude: f64,
    pub longitude: f64,
    pub coordsys: String,
    pub coordsys_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl From<LookupResult> for LookupResponse {
    fn from(result: LookupResult) -> Self {
        Self {
            ok: true,
            plz: result.postal_code.into_inner(),
            latitude: result.coordinate.latitude,
            longitude: result.coordinate.longitude,
            coordsys: result.system.key.to_string(),
            coordsys_name: result.system.display_name.to_string(),
            x: result.projected.map(|p| p.x),
            y: result.projected.map(|p| p.y),
        }
    }
}
