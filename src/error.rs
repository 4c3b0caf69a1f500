//! Error taxonomy for the lookup pipeline.
//!
//! Every failure the normalizer, the geocoding cache, the transformer or the
//! orchestrator can produce is one [`LookupError`] variant. Third-party errors
//! (reqwest, serde_json, proj4rs) are converted into it exactly once, at the
//! call site that talks to the library.
//!
//! The `Display` output of each variant is the short message shown to users;
//! internal details never leave the server.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

/// Classified failure of a PLZ lookup.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    /// Caller-fixable input problem (empty, oversized or malformed PLZ).
    #[error("{0}")]
    InvalidInput(String),

    /// The PLZ is well-formed but the provider knows no location for it.
    #[error("PLZ {plz} nicht gefunden.")]
    NotFound { plz: String },

    #[error("Der Geocoding-Dienst hat nicht rechtzeitig geantwortet. Bitte später erneut versuchen.")]
    UpstreamTimeout,

    #[error("Der Geocoding-Dienst ist derzeit nicht erreichbar. Bitte später erneut versuchen.")]
    UpstreamUnavailable,

    /// Unclassified upstream fault. Details are logged, never returned.
    #[error("Beim Geocoding ist ein unerwarteter Fehler aufgetreten.")]
    UpstreamUnexpected,

    /// Geocoding succeeded but the coordinate could not be expressed in the
    /// requested system.
    #[error("Die Koordinaten konnten nicht nach {system} umgerechnet werden.")]
    Projection { system: String },
}

impl LookupError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_found(plz: impl Into<String>) -> Self {
        Self::NotFound { plz: plz.into() }
    }

    pub fn projection(system: impl Into<String>) -> Self {
        Self::Projection {
            system: system.into(),
        }
    }

    /// HTTP status reported to API callers.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::Projection { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamTimeout | Self::UpstreamUnavailable | Self::UpstreamUnexpected => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    /// Stable machine-readable tag, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::UpstreamTimeout => "upstream_timeout",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamUnexpected => "upstream_unexpected",
            Self::Projection { .. } => "projection_error",
        }
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout | Self::UpstreamUnavailable | Self::UpstreamUnexpected
        )
    }
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            ok: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            LookupError::invalid_input("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LookupError::not_found("00000").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::UpstreamTimeout.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LookupError::UpstreamUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LookupError::UpstreamUnexpected.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LookupError::projection("UTM").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message_contains_plz() {
        let err = LookupError::not_found("01234");
        assert!(err.to_string().contains("01234"));
    }

    #[test]
    fn test_unexpected_message_is_generic() {
        let message = LookupError::UpstreamUnexpected.to_string();
        assert!(!message.contains("reqwest"));
        assert!(!message.is_empty());
    }

    #[test]
    fn test_transient_classification() {
        assert!(LookupError::UpstreamTimeout.is_transient());
        assert!(LookupError::UpstreamUnavailable.is_transient());
        assert!(!LookupError::invalid_input("x").is_transient());
        assert!(!LookupError::not_found("12345").is_transient());
        assert!(!LookupError::projection("GK").is_transient());
    }

    #[test]
    fn test_kind_tags_are_distinct() {
        let kinds = [
            LookupError::invalid_input("x").kind(),
            LookupError::not_found("1").kind(),
            LookupError::UpstreamTimeout.kind(),
            LookupError::UpstreamUnavailable.kind(),
            LookupError::UpstreamUnexpected.kind(),
            LookupError::projection("x").kind(),
        ];
        let unique: std::collections::HashSet<_> = kinds.iter().collect();
        assert_eq!(unique.len(), kinds.len());
    }
}
