//! Rate limiting middleware using token bucket algorithm.
//!
//! The upstream geocoder allows roughly one request per second for the whole
//! service, so lookups are limited per client before they reach the cache.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Seconds needed to replenish one request token.
const REPLENISH_SECONDS: u64 = 1;

/// Requests a client may issue back to back.
const BURST_SIZE: u32 = 20;

/// Creates a per-IP rate limiter keyed by the socket peer address.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 20 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
/// Requires the router to be served with `ConnectInfo<SocketAddr>`.
pub fn layer() -> GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Same limits as [`layer`], keyed by the client IP from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address.
///
/// Use only behind a trusted reverse proxy; clients can forge these headers.
pub fn proxied_layer()
-> GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(REPLENISH_SECONDS)
            .burst_size(BURST_SIZE)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit quota must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
