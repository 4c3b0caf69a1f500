//! DTOs for the coordinate system listing endpoint.

use serde::Serialize;

use crate::domain::entities::{CoordinateSystem, IDENTITY_KEY};

/// One supported coordinate system.
#[derive(Debug, Serialize)]
pub struct CoordinateSystemItem {
    pub key: &'static str,
    pub name: &'static str,
    pub epsg: &'static str,
}

impl From<&CoordinateSystem> for CoordinateSystemItem {
    fn from(system: &CoordinateSystem) -> Self {
        Self {
            key: system.key,
            name: system.display_name,
            epsg: system.epsg_code,
        }
    }
}

/// Response of `GET /api/coordsys`.
#[derive(Debug, Serialize)]
pub struct CoordinateSystemsResponse {
    pub ok: bool,
    pub default: &'static str,
    pub systems: Vec<CoordinateSystemItem>,
}

impl CoordinateSystemsResponse {
    pub fn from_registry() -> Self {
        Self {
            ok: true,
            default: IDENTITY_KEY,
            systems: CoordinateSystem::all().iter().map(Into::into).collect(),
        }
    }
}
