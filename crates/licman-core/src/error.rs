//! Construction-time errors. Everything that can go wrong after construction
//! is reported through a failed `ValidationResult` instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Action string is not one of activate, deactivate, check.
    #[error("unknown license action {0:?} (expected activate, deactivate or check)")]
    UnknownAction(String),

    /// Item ids are assigned by the licensing server and always start at 1.
    #[error("item id must be positive, got {0}")]
    InvalidItemId(i64),

    /// A configured server URL is neither empty nor an absolute http(s) URL.
    #[error("{field} is not a valid absolute http(s) URL: {value:?}")]
    InvalidUrl { field: &'static str, value: String },
}
