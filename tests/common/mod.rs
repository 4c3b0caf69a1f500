#![allow(dead_code)]

use async_trait::async_trait;
use plz_geocoder::application::services::LookupService;
use plz_geocoder::domain::Geocoder;
use plz_geocoder::domain::entities::{GeoCoordinate, PostalCode};
use plz_geocoder::error::LookupError;
use plz_geocoder::infrastructure::cache::GeocodeCache;
use plz_geocoder::state::AppState;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const DARMSTADT: (f64, f64) = (49.8728, 8.6512);
pub const BERLIN: (f64, f64) = (52.5200, 13.4050);

/// Geocoder answering from a fixed table. Unknown codes resolve to no match.
#[derive(Default)]
pub struct StubGeocoder {
    responses: HashMap<String, Result<Option<GeoCoordinate>, LookupError>>,
    calls: AtomicUsize,
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, plz: &str, (lat, lon): (f64, f64)) -> Self {
        self.responses
            .insert(plz.to_string(), Ok(Some(GeoCoordinate::new(lat, lon))));
        self
    }

    pub fn with_error(mut self, plz: &str, error: LookupError) -> Self {
        self.responses.insert(plz.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn geocode(&self, code: &PostalCode) -> Result<Option<GeoCoordinate>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(code.as_str())
            .cloned()
            .unwrap_or(Ok(None))
    }
}

pub fn create_test_state(geocoder: Arc<StubGeocoder>) -> AppState {
    let cache = GeocodeCache::new(geocoder, NonZeroUsize::new(64).unwrap());
    AppState::new(Arc::new(LookupService::new(Arc::new(cache))))
}

/// Stub knowing Darmstadt (64283) and Berlin (10117).
pub fn default_geocoder() -> Arc<StubGeocoder> {
    Arc::new(
        StubGeocoder::new()
            .with_location("64283", DARMSTADT)
            .with_location("10117", BERLIN),
    )
}
