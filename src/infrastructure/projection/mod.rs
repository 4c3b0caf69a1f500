//! WGS84 to projected coordinate transforms backed by `proj4rs`.
//!
//! Definitions come from the static [`CoordinateSystem`] registry and are
//! parsed per call; a transform is cheap next to the geocoding round trip, so
//! nothing is cached here.

use crate::domain::entities::{CoordinateSystem, GeoCoordinate, ProjectedCoordinate};
use crate::error::LookupError;
use proj4rs::Proj;
use proj4rs::transform::transform;
use tracing::{debug, warn};

/// Source definition for every transform.
const WGS84_DEF: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Projects `coord` into `target`.
///
/// The result is always (easting, northing) in the target's units. For the
/// identity system the coordinate is returned as (longitude, latitude)
/// without touching the projection library.
///
/// # Errors
///
/// Returns [`LookupError::Projection`] if:
/// - the coordinate is outside the target's valid area
/// - the target definition cannot be parsed
/// - `proj4rs` reports a transform error
/// - the transform yields a non-finite value
pub fn project(
    coord: &GeoCoordinate,
    target: &CoordinateSystem,
) -> Result<ProjectedCoordinate, LookupError> {
    if target.is_identity() {
        return Ok(ProjectedCoordinate {
            x: coord.longitude,
            y: coord.latitude,
        });
    }

    let failed = || LookupError::projection(target.display_name);

    if !coord.is_valid() || !target.accepts(coord) {
        warn!(
            coordsys = target.key,
            lat = coord.latitude,
            lon = coord.longitude,
            "Coordinate outside valid area of target system"
        );
        return Err(failed());
    }

    let source = Proj::from_proj_string(WGS84_DEF).map_err(|e| {
        warn!(error = %e, "Invalid WGS84 definition");
        failed()
    })?;

    let destination = Proj::from_proj_string(target.proj_def).map_err(|e| {
        warn!(coordsys = target.key, error = %e, "Invalid projection definition");
        failed()
    })?;

    // proj4rs expects geographic input in radians.
    let mut point = (coord.longitude.to_radians(), coord.latitude.to_radians(), 0.0);
    transform(&source, &destination, &mut point).map_err(|e| {
        warn!(coordsys = target.key, error = %e, "Projection failed");
        failed()
    })?;

    let (x, y, _) = point;
    if !x.is_finite() || !y.is_finite() {
        warn!(coordsys = target.key, x, y, "Projection produced non-finite output");
        return Err(failed());
    }

    debug!(coordsys = target.key, x, y, "Projected coordinate");
    Ok(ProjectedCoordinate { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn darmstadt() -> GeoCoordinate {
        GeoCoordinate::new(49.8728, 8.6512)
    }

    fn berlin() -> GeoCoordinate {
        GeoCoordinate::new(52.5200, 13.4050)
    }

    fn system(key: &str) -> &'static CoordinateSystem {
        CoordinateSystem::find(key).unwrap()
    }

    #[test]
    fn test_darmstadt_to_utm32_within_bounds() {
        let p = project(&darmstadt(), system("utm32")).unwrap();
        assert!((300_000.0..=500_000.0).contains(&p.x), "x = {}", p.x);
        assert!((5_400_000.0..=5_600_000.0).contains(&p.y), "y = {}", p.y);
    }

    #[test]
    fn test_darmstadt_to_utm32_close_to_reference() {
        // Reference from EPSG:25832: roughly E 475 600 / N 5 524 900.
        let p = project(&darmstadt(), system("utm32")).unwrap();
        assert!((p.x - 475_600.0).abs() < 1_000.0, "x = {}", p.x);
        assert!((p.y - 5_524_900.0).abs() < 1_000.0, "y = {}", p.y);
    }

    #[test]
    fn test_berlin_to_utm33_within_bounds() {
        let p = project(&berlin(), system("utm33")).unwrap();
        assert!((350_000.0..=450_000.0).contains(&p.x), "x = {}", p.x);
        assert!((5_780_000.0..=5_860_000.0).contains(&p.y), "y = {}", p.y);
    }

    #[test]
    fn test_darmstadt_to_gauss_krueger_zone3() {
        let p = project(&darmstadt(), system("gk3")).unwrap();
        // Zone number is the leading digit of the easting.
        assert!((3_400_000.0..=3_600_000.0).contains(&p.x), "x = {}", p.x);
        assert!((5_400_000.0..=5_600_000.0).contains(&p.y), "y = {}", p.y);
    }

    #[test]
    fn test_output_is_easting_then_northing() {
        for cs in CoordinateSystem::all().iter().filter(|cs| !cs.is_identity()) {
            if let Ok(p) = project(&darmstadt(), cs) {
                assert!(p.y > p.x, "{}: {:?}", cs.key, p);
                assert!(p.y > 5_000_000.0, "{}: {:?}", cs.key, p);
            }
        }
    }

    #[test]
    fn test_outside_zone_is_projection_error() {
        // Darmstadt lies west of the Gauß-Krüger zone 5 strip.
        let err = project(&darmstadt(), system("gk5")).unwrap_err();
        assert!(matches!(err, LookupError::Projection { .. }));
        assert!(err.to_string().contains("Zone 5"));
    }

    #[test]
    fn test_invalid_definition_is_projection_error() {
        let broken = CoordinateSystem {
            key: "broken",
            display_name: "Broken",
            epsg_code: "EPSG:0",
            proj_def: "+proj=doesnotexist +units=m",
            valid_area: None,
        };
        let err = project(&darmstadt(), &broken).unwrap_err();
        assert_eq!(err, LookupError::projection("Broken"));
    }

    #[test]
    fn test_identity_returns_lon_lat() {
        let p = project(&darmstadt(), CoordinateSystem::identity()).unwrap();
        assert_eq!(p.x, 8.6512);
        assert_eq!(p.y, 49.8728);
    }
}
