//! Transport-level failure (no usable HTTP response).

use thiserror::Error;

/// Coarse classification of a transport failure, for logging and callers
/// that want to react differently to e.g. TLS problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connect or transfer timed out.
    Timeout,
    /// DNS, refused connection, reset, or nothing received.
    Connection,
    /// Handshake or certificate verification failed.
    Tls,
    /// URL empty, malformed, or using an unsupported scheme.
    InvalidUrl,
    /// Response body larger than the configured limit.
    BodyTooLarge,
    Other,
}

/// A request that did not produce an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    /// Human-readable description; surfaced as the result message.
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<curl::Error> for TransportError {
    fn from(e: curl::Error) -> Self {
        let kind = super::classify_curl_error(&e);
        let message = match e.extra_description() {
            Some(extra) if !extra.is_empty() => format!("{}: {}", e.description(), extra),
            _ => e.description().to_string(),
        };
        TransportError { kind, message }
    }
}
