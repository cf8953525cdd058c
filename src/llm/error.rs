//! Typed errors for model-call operations
//!
//! Structured variants instead of string matching, so callers can
//! distinguish auth, rate-limit, and transport failures.

use thiserror::Error;

/// Model-call failures surfaced to the invoker
#[derive(Debug, Error)]
pub enum ModelError {
    /// Authentication token is expired or invalid (HTTP 401/403)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Malformed request (HTTP 400); a bug in the client or caller
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Server-side error (HTTP 5xx)
    #[error("service error: {0}")]
    ServiceError(String),

    /// Network connectivity issue (connection refused, timeout, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived but could not be parsed into the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ModelError {
    /// Convert an HTTP status code and error body into a typed variant
    pub fn from_http_status(status: reqwest::StatusCode, error_text: String) -> Self {
        match status.as_u16() {
            401 | 403 => ModelError::Unauthorized(error_text),
            429 => ModelError::RateLimited(error_text),
            400 => ModelError::BadRequest(error_text),
            500..=599 => ModelError::ServiceError(error_text),
            code => ModelError::ServiceError(format!("HTTP {code}: {error_text}")),
        }
    }

    /// Convert network/connection errors into a typed variant
    pub fn from_network_error(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ModelError::Network(format!("request timeout: {e}"))
        } else if e.is_connect() {
            ModelError::Network(format!("connection failed: {e}"))
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            ModelError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_http_status_maps_auth_and_rate_limit() {
        let err = ModelError::from_http_status(
            reqwest::StatusCode::UNAUTHORIZED,
            "invalid token".to_string(),
        );
        assert!(matches!(err, ModelError::Unauthorized(_)));

        let err = ModelError::from_http_status(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            "quota exceeded".to_string(),
        );
        assert!(matches!(err, ModelError::RateLimited(_)));
    }

    #[test]
    fn from_http_status_maps_client_and_server_errors() {
        let err = ModelError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            "missing field".to_string(),
        );
        assert!(matches!(err, ModelError::BadRequest(_)));

        let err = ModelError::from_http_status(
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "overloaded".to_string(),
        );
        assert!(matches!(err, ModelError::ServiceError(_)));
    }

    #[test]
    fn error_display_keeps_message() {
        let err = ModelError::Unauthorized("token expired".to_string());
        assert_eq!(err.to_string(), "unauthorized: token expired");
    }
}
