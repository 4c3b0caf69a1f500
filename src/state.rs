//! Shared state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::LookupService;

/// Application state cloned into every request.
///
/// The lookup service owns the geocoding cache, the only shared mutable
/// resource; everything else is immutable.
#[derive(Clone)]
pub struct AppState {
    pub lookup_service: Arc<LookupService>,
}

impl AppState {
    pub fn new(lookup_service: Arc<LookupService>) -> Self {
        Self { lookup_service }
    }
}
