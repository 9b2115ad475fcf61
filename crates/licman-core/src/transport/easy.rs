//! libcurl-backed transport.
//!
//! Each call uses a fresh `Easy` handle and runs in the current thread; call
//! from `spawn_blocking` if used from async code.

use super::{HttpResponse, Transport, TransportError, TransportErrorKind};
use curl::easy::{Easy, List};
use std::time::Duration;

/// License responses are a few hundred bytes of JSON.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

const USER_AGENT: &str = concat!("licman/", env!("CARGO_PKG_VERSION"));

/// Timeouts and TLS settings for [`CurlTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportOptions {
    pub connect_timeout: Duration,
    /// Whole-request bound for the reachability probe.
    pub probe_timeout: Duration,
    /// Whole-request bound for the license POST.
    pub request_timeout: Duration,
    /// Verify the server certificate and host name. Disabling this accepts
    /// self-signed or misconfigured licensing endpoints.
    pub verify_tls: bool,
    /// Largest license response body accepted; larger replies abort the transfer.
    pub max_response_bytes: usize,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            verify_tls: true,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: TransportOptions,
}

impl CurlTransport {
    pub fn new(options: TransportOptions) -> Self {
        if !options.verify_tls {
            tracing::warn!("TLS certificate verification disabled for licensing requests");
        }
        Self { options }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    fn easy(&self, url: &str, timeout: Duration) -> Result<Easy, TransportError> {
        if url.is_empty() {
            return Err(TransportError::new(
                TransportErrorKind::InvalidUrl,
                "no licensing server URL configured",
            ));
        }
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.useragent(USER_AGENT)?;
        easy.follow_location(true)?;
        easy.max_redirections(5)?;
        easy.connect_timeout(self.options.connect_timeout.min(timeout))?;
        easy.timeout(timeout)?;
        easy.ssl_verify_peer(self.options.verify_tls)?;
        easy.ssl_verify_host(self.options.verify_tls)?;
        Ok(easy)
    }
}

impl Transport for CurlTransport {
    fn probe(&self, url: &str) -> Result<u32, TransportError> {
        let mut easy = self.easy(url, self.options.probe_timeout)?;
        easy.get(true)?;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| Ok(data.len()))?;
            transfer.perform()?;
        }
        Ok(easy.response_code()?)
    }

    fn post_form(&self, url: &str, fields: &[(&str, String)]) -> Result<HttpResponse, TransportError> {
        let form = serde_urlencoded::to_string(fields).map_err(|e| {
            TransportError::new(TransportErrorKind::Other, format!("encode form body: {}", e))
        })?;

        let mut easy = self.easy(url, self.options.request_timeout)?;
        easy.post(true)?;
        easy.post_fields_copy(form.as_bytes())?;

        let mut list = List::new();
        list.append("Content-Type: application/x-www-form-urlencoded")?;
        list.append("Accept: application/json")?;
        // Small bodies; skip the 100-continue round trip.
        list.append("Expect:")?;
        easy.http_headers(list)?;

        let limit = self.options.max_response_bytes;
        let mut body = Vec::new();
        let mut oversized = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if body.len() + data.len() > limit {
                    oversized = true;
                    return Ok(0); // abort transfer
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if oversized {
            return Err(TransportError::new(
                TransportErrorKind::BodyTooLarge,
                format!("license response from {} exceeds {} bytes", url, limit),
            ));
        }
        performed?;

        let status = easy.response_code()?;
        Ok(HttpResponse { status, body })
    }
}
