//! HTTP transport used to reach the licensing servers.
//!
//! Providers depend only on the [`Transport`] trait; [`CurlTransport`] is the
//! libcurl implementation used in production.

mod classify;
mod easy;
mod error;

pub use classify::classify_curl_error;
pub use easy::{CurlTransport, TransportOptions, DEFAULT_MAX_RESPONSE_BYTES};
pub use error::{TransportError, TransportErrorKind};

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body as text (lossy), for logging.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The two HTTP exchanges a license check needs.
pub trait Transport {
    /// Lightweight reachability check: GET `url`, discard the body, return the status.
    fn probe(&self, url: &str) -> Result<u32, TransportError>;

    /// POST `fields` as `application/x-www-form-urlencoded` to `url`.
    fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn probe(&self, url: &str) -> Result<u32, TransportError> {
        (**self).probe(url)
    }

    fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<HttpResponse, TransportError> {
        (**self).post_form(url, fields)
    }
}
