//! HTTP server initialization and runtime setup.
//!
//! Builds the lookup pipeline from [`Config`] and runs the Axum server until
//! a shutdown signal arrives.

use crate::application::services::LookupService;
use crate::config::Config;
use crate::domain::Geocoder;
use crate::infrastructure::cache::GeocodeCache;
use crate::infrastructure::geocoding::NominatimGeocoder;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the geocoder, cache and lookup service described by `config`.
///
/// The returned service is meant to be created once per process and shared.
///
/// # Errors
///
/// Returns an error if the geocoder URL is invalid, the HTTP client cannot be
/// built, or the cache capacity is 0.
pub fn build_lookup_service(config: &Config) -> Result<Arc<LookupService>> {
    let geocoder: Arc<dyn Geocoder> = Arc::new(
        NominatimGeocoder::from_config(config).context("Failed to initialize geocoder")?,
    );
    let cache = Arc::new(GeocodeCache::new(geocoder, config.cache_capacity()?));

    Ok(Arc::new(LookupService::new(cache)))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The lookup pipeline cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let lookup_service = build_lookup_service(&config)?;
    tracing::info!("Geocoder ready ({})", config.geocoder_url);

    let state = AppState::new(lookup_service);
    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives Ctrl+C (or SIGTERM on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
