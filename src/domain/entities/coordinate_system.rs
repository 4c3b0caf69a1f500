//! Coordinate reference systems supported by the service.
//!
//! The registry is fixed configuration data. Each entry carries the PROJ
//! definition the transformer feeds to `proj4rs` and, for projected systems,
//! the area in which the projection is considered meaningful.

use super::coordinate::GeoCoordinate;

/// Key of the identity system (plain WGS84 latitude/longitude).
pub const IDENTITY_KEY: &str = "latlon";

const WGS84_EPSG: &str = "EPSG:4326";

/// Longitude/latitude bounding box in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidArea {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl ValidArea {
    pub fn contains(&self, coord: &GeoCoordinate) -> bool {
        (self.min_lon..=self.max_lon).contains(&coord.longitude)
            && (self.min_lat..=self.max_lat).contains(&coord.latitude)
    }
}

/// A registry entry describing one target coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystem {
    /// Short key used in query strings (`coordsys=utm32`).
    pub key: &'static str,
    pub display_name: &'static str,
    pub epsg_code: &'static str,
    /// PROJ.4 style definition string.
    pub proj_def: &'static str,
    /// `None` means the system accepts any valid WGS84 coordinate.
    pub valid_area: Option<ValidArea>,
}

// UTM zones are accepted up to one neighbouring zone away, which covers all of
// Germany for both 32N and 33N. Gauß-Krüger strips get 4.5° on either side of
// their central meridian.
const fn utm_area(central_meridian: f64) -> ValidArea {
    ValidArea {
        min_lon: central_meridian - 9.0,
        max_lon: central_meridian + 9.0,
        min_lat: 0.0,
        max_lat: 84.0,
    }
}

const fn gauss_krueger_area(central_meridian: f64) -> ValidArea {
    ValidArea {
        min_lon: central_meridian - 4.5,
        max_lon: central_meridian + 4.5,
        min_lat: 45.0,
        max_lat: 57.0,
    }
}

static REGISTRY: [CoordinateSystem; 7] = [
    CoordinateSystem {
        key: IDENTITY_KEY,
        display_name: "WGS84 (Lat/Lon)",
        epsg_code: WGS84_EPSG,
        proj_def: "+proj=longlat +datum=WGS84 +no_defs",
        valid_area: None,
    },
    CoordinateSystem {
        key: "utm32",
        display_name: "ETRS89 / UTM Zone 32N",
        epsg_code: "EPSG:25832",
        proj_def: "+proj=utm +zone=32 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
        valid_area: Some(utm_area(9.0)),
    },
    CoordinateSystem {
        key: "utm33",
        display_name: "ETRS89 / UTM Zone 33N",
        epsg_code: "EPSG:25833",
        proj_def: "+proj=utm +zone=33 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
        valid_area: Some(utm_area(15.0)),
    },
    CoordinateSystem {
        key: "gk2",
        display_name: "DHDN / Gauß-Krüger Zone 2",
        epsg_code: "EPSG:31466",
        proj_def: "+proj=tmerc +lat_0=0 +lon_0=6 +k=1 +x_0=2500000 +y_0=0 +ellps=bessel \
                   +towgs84=598.1,73.7,418.2,0.202,0.045,-2.455,6.7 +units=m +no_defs",
        valid_area: Some(gauss_krueger_area(6.0)),
    },
    CoordinateSystem {
        key: "gk3",
        display_name: "DHDN / Gauß-Krüger Zone 3",
        epsg_code: "EPSG:31467",
        proj_def: "+proj=tmerc +lat_0=0 +lon_0=9 +k=1 +x_0=3500000 +y_0=0 +ellps=bessel \
                   +towgs84=598.1,73.7,418.2,0.202,0.045,-2.455,6.7 +units=m +no_defs",
        valid_area: Some(gauss_krueger_area(9.0)),
    },
    CoordinateSystem {
        key: "gk4",
        display_name: "DHDN / Gauß-Krüger Zone 4",
        epsg_code: "EPSG:31468",
        proj_def: "+proj=tmerc +lat_0=0 +lon_0=12 +k=1 +x_0=4500000 +y_0=0 +ellps=bessel \
                   +towgs84=598.1,73.7,418.2,0.202,0.045,-2.455,6.7 +units=m +no_defs",
        valid_area: Some(gauss_krueger_area(12.0)),
    },
    CoordinateSystem {
        key: "gk5",
        display_name: "DHDN / Gauß-Krüger Zone 5",
        epsg_code: "EPSG:31469",
        proj_def: "+proj=tmerc +lat_0=0 +lon_0=15 +k=1 +x_0=5500000 +y_0=0 +ellps=bessel \
                   +towgs84=598.1,73.7,418.2,0.202,0.045,-2.455,6.7 +units=m +no_defs",
        valid_area: Some(gauss_krueger_area(15.0)),
    },
];

impl CoordinateSystem {
    /// All supported systems, identity first.
    pub fn all() -> &'static [CoordinateSystem] {
        &REGISTRY
    }

    /// The WGS84 latitude/longitude system.
    pub fn identity() -> &'static CoordinateSystem {
        &REGISTRY[0]
    }

    /// Finds a system by key. Keys are matched case-insensitively after trimming.
    pub fn find(key: &str) -> Option<&'static CoordinateSystem> {
        let key = key.trim();
        REGISTRY.iter().find(|cs| cs.key.eq_ignore_ascii_case(key))
    }

    /// Finds a system by key, falling back to the identity system for
    /// unknown or empty keys.
    pub fn find_or_identity(key: &str) -> &'static CoordinateSystem {
        Self::find(key).unwrap_or_else(|| {
            if !key.trim().is_empty() {
                tracing::debug!(coordsys = key, "Unknown coordinate system, using {IDENTITY_KEY}");
            }
            Self::identity()
        })
    }

    pub fn is_identity(&self) -> bool {
        self.epsg_code == WGS84_EPSG
    }

    /// Returns true if `coord` lies where this system may be used.
    pub fn accepts(&self, coord: &GeoCoordinate) -> bool {
        self.valid_area.is_none_or(|area| area.contains(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identity_is_latlon() {
        let identity = CoordinateSystem::identity();
        assert_eq!(identity.key, "latlon");
        assert_eq!(identity.epsg_code, "EPSG:4326");
        assert!(identity.is_identity());
    }

    #[test]
    fn test_only_identity_is_identity() {
        let identities = CoordinateSystem::all()
            .iter()
            .filter(|cs| cs.is_identity())
            .count();
        assert_eq!(identities, 1);
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = CoordinateSystem::all().iter().map(|cs| cs.key).collect();
        assert_eq!(keys.len(), CoordinateSystem::all().len());
    }

    #[test]
    fn test_find_known_key() {
        let utm = CoordinateSystem::find("utm32").unwrap();
        assert_eq!(utm.epsg_code, "EPSG:25832");
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(
            CoordinateSystem::find(" UTM32 ").map(|cs| cs.key),
            Some("utm32")
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_identity() {
        assert!(CoordinateSystem::find("utm99").is_none());
        assert_eq!(CoordinateSystem::find_or_identity("utm99").key, "latlon");
        assert_eq!(CoordinateSystem::find_or_identity("").key, "latlon");
    }

    #[test]
    fn test_gauss_krueger_area() {
        let gk3 = CoordinateSystem::find("gk3").unwrap();
        assert!(gk3.accepts(&GeoCoordinate::new(49.8728, 8.6512)));
        assert!(!gk3.accepts(&GeoCoordinate::new(52.52, 14.0)));
    }

    #[test]
    fn test_identity_accepts_everything() {
        let identity = CoordinateSystem::identity();
        assert!(identity.accepts(&GeoCoordinate::new(-45.0, -170.0)));
    }
}
