//! Place source error types

use thiserror::Error;

/// Place source error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct PlacesError {
    pub kind: PlacesErrorKind,
    pub message: String,
}

impl PlacesError {
    pub fn new(kind: PlacesErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PlacesErrorKind::Network, message)
    }

    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::new(PlacesErrorKind::RateLimit, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(PlacesErrorKind::ServerError, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(PlacesErrorKind::Auth, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(PlacesErrorKind::InvalidRequest, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(PlacesErrorKind::Unknown, message)
    }
}

/// Error classification, mirrors HTTP/provider status semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacesErrorKind {
    /// Network issues, timeouts - retryable
    Network,
    /// Provider quota exceeded - retryable with backoff
    RateLimit,
    /// Server error (5xx) - retryable
    ServerError,
    /// Key rejected (401, 403, REQUEST_DENIED) - not retryable
    Auth,
    /// Bad request (400, INVALID_REQUEST) - not retryable
    InvalidRequest,
    /// Unknown error
    Unknown,
}

impl PlacesErrorKind {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network | Self::RateLimit | Self::ServerError)
    }
}
