//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and then passed to the
//! components that need it. Nothing reads the environment after that.
//!
//! ## Example
//!
//! ```bash
//! export NOMINATIM_USER_AGENT="plz-koordinaten (contact: ops@example.com)"
//! export NOMINATIM_TIMEOUT="4"
//! export GEOCODE_CACHE_CAPACITY="2048"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:$PORT`, `PORT` defaults to `8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `NOMINATIM_USER_AGENT` - Identifying client label required by the provider
//! - `NOMINATIM_URL` - Provider base URL (default: `https://nominatim.openstreetmap.org`)
//! - `NOMINATIM_TIMEOUT` - Request timeout in seconds, clamped to 1..=20 (default: 4)
//! - `NOMINATIM_COUNTRY` - Country filter, comma-separated ISO codes (default: `de`)
//! - `GEOCODE_CACHE_CAPACITY` - Cached postal codes (default: 2048, max: 1000000)
//! - `BEHIND_PROXY` - Read client IPs from forwarding headers (default: `false`)

use anyhow::{Context, Result};
use std::env;
use std::num::NonZeroUsize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "plz-koordinaten (contact: you@example.com)";
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_COUNTRY_CODES: &str = "de";

/// Bounds for the upstream request timeout, in seconds.
pub const MIN_TIMEOUT_SECS: f64 = 1.0;
pub const MAX_TIMEOUT_SECS: f64 = 20.0;
pub const DEFAULT_TIMEOUT_SECS: f64 = 4.0;

pub const DEFAULT_CACHE_CAPACITY: usize = 2048;
pub const MAX_CACHE_CAPACITY: usize = 1_000_000;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    // ── Geocoder ────────────────────────────────────────────────────────────
    /// `User-Agent` sent to the provider. Nominatim blocks anonymous clients.
    pub user_agent: String,
    pub geocoder_url: String,
    /// Always within [`MIN_TIMEOUT_SECS`]..=[`MAX_TIMEOUT_SECS`].
    pub geocoder_timeout: Duration,
    /// Comma-separated ISO 3166-1 alpha-2 codes, lowercase.
    pub country_codes: String,

    // ── Cache ───────────────────────────────────────────────────────────────
    /// Maximum number of postal codes kept in the geocoding cache.
    pub cache_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            behind_proxy: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            geocoder_timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
            country_codes: DEFAULT_COUNTRY_CODES.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Missing or unparsable values fall back to their defaults; the timeout
    /// is clamped into range. Call [`Config::validate`] afterwards.
    pub fn from_env() -> Result<Self> {
        let listen_addr = Self::load_listen_addr();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let user_agent = env::var("NOMINATIM_USER_AGENT")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let geocoder_url =
            env::var("NOMINATIM_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

        let geocoder_timeout = clamp_timeout(
            env::var("NOMINATIM_TIMEOUT")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        );

        let country_codes = env::var("NOMINATIM_COUNTRY")
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_else(|_| DEFAULT_COUNTRY_CODES.to_string());

        let cache_capacity = env::var("GEOCODE_CACHE_CAPACITY")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_CACHE_CAPACITY);

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            user_agent,
            geocoder_url,
            geocoder_timeout,
            country_codes,
            cache_capacity,
        })
    }

    /// Loads the bind address.
    ///
    /// Priority:
    /// 1. `LISTEN` environment variable
    /// 2. `0.0.0.0:$PORT` (container platforms inject `PORT`)
    /// 3. `0.0.0.0:8080`
    fn load_listen_addr() -> String {
        if let Ok(listen) = env::var("LISTEN") {
            return listen;
        }

        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
        format!("0.0.0.0:{}", port)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `user_agent` is empty
    /// - `geocoder_url` is not an http(s) URL
    /// - `country_codes` is not a list of two-letter codes
    /// - `cache_capacity` is 0 or larger than [`MAX_CACHE_CAPACITY`]
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.user_agent.is_empty() {
            anyhow::bail!("NOMINATIM_USER_AGENT must not be empty");
        }

        let url = Url::parse(&self.geocoder_url)
            .with_context(|| format!("NOMINATIM_URL is not a valid URL: '{}'", self.geocoder_url))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!(
                "NOMINATIM_URL must start with 'http://' or 'https://', got '{}'",
                self.geocoder_url
            );
        }

        let codes_valid = !self.country_codes.is_empty()
            && self
                .country_codes
                .split(',')
                .all(|c| c.len() == 2 && c.bytes().all(|b| b.is_ascii_lowercase()));
        if !codes_valid {
            anyhow::bail!(
                "NOMINATIM_COUNTRY must be comma-separated two-letter codes, got '{}'",
                self.country_codes
            );
        }

        if self.cache_capacity == 0 || self.cache_capacity > MAX_CACHE_CAPACITY {
            anyhow::bail!(
                "GEOCODE_CACHE_CAPACITY must be between 1 and {}, got {}",
                MAX_CACHE_CAPACITY,
                self.cache_capacity
            );
        }

        Ok(())
    }

    /// Cache capacity as the non-zero type the cache expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is 0.
    pub fn cache_capacity(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.cache_capacity).context("GEOCODE_CACHE_CAPACITY must not be 0")
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Geocoder: {}", self.geocoder_url);
        tracing::info!("  User agent: {}", self.user_agent);
        tracing::info!("  Timeout: {:.1}s", self.geocoder_timeout.as_secs_f64());
        tracing::info!("  Country filter: {}", self.country_codes);
        tracing::info!("  Cache capacity: {}", self.cache_capacity);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Clamps a timeout in seconds into the supported range.
///
/// Non-finite values yield the default.
pub fn clamp_timeout(seconds: f64) -> Duration {
    if !seconds.is_finite() {
        return Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS);
    }
    Duration::from_secs_f64(seconds.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS))
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
