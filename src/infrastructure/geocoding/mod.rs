//! Upstream geocoding clients implementing [`crate::domain::Geocoder`].

mod nominatim;

pub use nominatim::NominatimGeocoder;
