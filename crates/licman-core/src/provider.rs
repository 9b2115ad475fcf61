//! The two-phase license provider contract and its result types.

use crate::transport::{HttpResponse, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// License status reported when the server does not supply one.
pub const DEFAULT_LICENSE_STATUS: &str = "invalid";

/// Outcome of the network phase, handed unchanged to the interpretation phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// URL the license request was sent to.
    pub target: String,
    /// True when `target` is the proxy server.
    pub used_proxy: bool,
    pub outcome: Result<HttpResponse, TransportError>,
}

/// Normalized result of one validation attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub success: bool,
    /// Server-reported status such as `valid`, `expired`, `site_inactive`.
    pub license_status: String,
    /// Human-readable message; shown regardless of `success`.
    pub message: String,
    /// Parsed response body, or an empty object when there is none.
    pub raw_response: Value,
}

impl ValidationResult {
    /// Failed result with no parsed body.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            license_status: DEFAULT_LICENSE_STATUS.to_string(),
            message: message.into(),
            raw_response: Value::Object(Default::default()),
        }
    }
}

/// A licensing-server protocol.
///
/// `validate` does all network work and never fails: transport errors and
/// bad statuses are captured in the returned [`RawResponse`]. `interpret`
/// is pure with respect to its input, so interpreting the same raw response
/// twice yields the same result.
///
/// A provider holds no per-attempt mutable state; sharing one across threads
/// is safe as long as its transport is.
pub trait LicenseProvider {
    fn validate(&self) -> RawResponse;

    fn interpret(&self, raw: &RawResponse) -> ValidationResult;

    /// `validate` followed by `interpret`.
    fn run(&self) -> ValidationResult {
        let raw = self.validate();
        self.interpret(&raw)
    }
}
