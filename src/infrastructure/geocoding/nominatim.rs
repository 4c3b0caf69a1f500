//! Nominatim (OpenStreetMap) geocoding client.

use crate::config::Config;
use crate::domain::Geocoder;
use crate::domain::entities::{GeoCoordinate, PostalCode};
use crate::error::LookupError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::Url;

/// One place in a Nominatim `search` response. Coordinates arrive as
/// decimal strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// Geocoder backed by the Nominatim `search` endpoint.
///
/// The usage policy requires an identifying `User-Agent` and at most one
/// request per second, which is why every call goes through
/// [`crate::infrastructure::cache::GeocodeCache`].
pub struct NominatimGeocoder {
    client: reqwest::Client,
    search_url: Url,
    country_codes: String,
}

impl NominatimGeocoder {
    /// Builds a client for the Nominatim instance at `base_url`.
    ///
    /// # Arguments
    ///
    /// - `base_url` - Instance root, e.g. `https://nominatim.openstreetmap.org`
    /// - `user_agent` - Identifying client label sent with every request
    /// - `timeout` - Total request timeout
    /// - `country_codes` - Comma-separated ISO 3166-1 alpha-2 filter (`de`)
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        country_codes: &str,
    ) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("Invalid geocoder base URL '{base_url}'"))?;
        // Keep a path prefix such as `/nominatim` when joining.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let search_url = base
            .join("search")
            .context("Failed to build Nominatim search URL")?;

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            search_url,
            country_codes: country_codes.to_string(),
        })
    }

    /// Builds a client from the geocoder settings in [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.geocoder_url,
            &config.user_agent,
            config.geocoder_timeout,
            &config.country_codes,
        )
    }

    fn parse_place(code: &PostalCode, place: &NominatimPlace) -> Result<GeoCoordinate, LookupError> {
        let latitude = place.lat.trim().parse::<f64>();
        let longitude = place.lon.trim().parse::<f64>();

        match (latitude, longitude) {
            (Ok(latitude), Ok(longitude)) => {
                let coordinate = GeoCoordinate::new(latitude, longitude);
                if coordinate.is_valid() {
                    Ok(coordinate)
                } else {
                    error!(plz = %code, lat = %place.lat, lon = %place.lon, "Nominatim returned out-of-range coordinates");
                    Err(LookupError::UpstreamUnexpected)
                }
            }
            _ => {
                error!(plz = %code, lat = %place.lat, lon = %place.lon, "Nominatim returned unparsable coordinates");
                Err(LookupError::UpstreamUnexpected)
            }
        }
    }
}

/// Classifies a transport-level reqwest failure.
fn map_transport_error(code: &PostalCode, e: reqwest::Error) -> LookupError {
    if e.is_timeout() {
        warn!(plz = %code, error = %e, "Nominatim request timed out");
        LookupError::UpstreamTimeout
    } else if e.is_connect() || e.is_request() {
        warn!(plz = %code, error = %e, "Nominatim unreachable");
        LookupError::UpstreamUnavailable
    } else {
        error!(plz = %code, error = ?e, "Unexpected Nominatim failure");
        LookupError::UpstreamUnexpected
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, code: &PostalCode) -> Result<Option<GeoCoordinate>, LookupError> {
        debug!(plz = %code, "Querying Nominatim");

        let response = self
            .client
            .get(self.search_url.clone())
            .query(&[
                ("postalcode", code.as_str()),
                ("countrycodes", self.country_codes.as_str()),
                ("format", "jsonv2"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error(code, e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            warn!(plz = %code, %status, "Nominatim unavailable");
            return Err(LookupError::UpstreamUnavailable);
        }
        if !status.is_success() {
            error!(plz = %code, %status, "Nominatim rejected request");
            return Err(LookupError::UpstreamUnexpected);
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            if e.is_decode() {
                error!(plz = %code, error = %e, "Failed to decode Nominatim response");
                LookupError::UpstreamUnexpected
            } else {
                map_transport_error(code, e)
            }
        })?;

        match places.first() {
            Some(place) => Self::parse_place(code, place).map(Some),
            None => {
                debug!(plz = %code, "Nominatim has no match");
                Ok(None)
            }
        }
    }
}
