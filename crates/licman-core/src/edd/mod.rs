//! Easy Digital Downloads licensing protocol.
//!
//! Requests are form-encoded POSTs carrying `edd_action`, `license`,
//! `item_id` and `url`; responses are JSON objects with `success`, and
//! optionally `error`, `license` and `expires`.

mod interpret;

use crate::messages::{DateFormatter, StrftimeDateFormatter};
use crate::provider::{LicenseProvider, RawResponse, ValidationResult};
use crate::settings::LicenseConfig;
use crate::transport::{CurlTransport, Transport};
use serde::{Deserialize, Serialize};

/// How the proxy server comes into play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// GET the primary first; POST to the proxy if that probe is not a 200.
    #[default]
    Probe,
    /// POST to the primary; repeat the POST against the proxy if it fails
    /// or returns anything but 200.
    OnFailure,
}

pub struct EddLicenseManager<T = CurlTransport> {
    config: LicenseConfig,
    site_url: String,
    transport: T,
    formatter: Box<dyn DateFormatter + Send + Sync>,
    fallback: FallbackStrategy,
}

impl<T: Transport> EddLicenseManager<T> {
    /// `site_url` is the public home URL of the calling site, sent as `url`.
    pub fn new(config: LicenseConfig, site_url: &str, transport: T) -> Self {
        Self {
            config,
            site_url: site_url.to_string(),
            transport,
            formatter: Box::new(StrftimeDateFormatter::default()),
            fallback: FallbackStrategy::default(),
        }
    }

    pub fn with_date_formatter(mut self, formatter: Box<dyn DateFormatter + Send + Sync>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackStrategy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn config(&self) -> &LicenseConfig {
        &self.config
    }

    pub fn fallback(&self) -> FallbackStrategy {
        self.fallback
    }

    /// Form fields of the license request.
    pub fn request_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("edd_action", self.config.action().provider_action()),
            ("license", self.config.license_key().to_string()),
            ("item_id", self.config.item_id().to_string()),
            ("url", self.site_url.clone()),
        ]
    }

    /// Picks the POST target by probing the primary server.
    ///
    /// Returns the URL and whether it is the proxy. Without a configured
    /// proxy the primary is used even when the probe fails.
    pub fn select_target(&self) -> (&str, bool) {
        let primary = self.config.primary_server_url();
        let healthy = match self.transport.probe(primary) {
            Ok(200) => true,
            Ok(code) => {
                tracing::warn!("licensing server {} answered probe with HTTP {}", primary, code);
                false
            }
            Err(e) => {
                tracing::warn!("licensing server {} unreachable: {}", primary, e);
                false
            }
        };
        if healthy {
            tracing::debug!("licensing server {} healthy", primary);
            return (primary, false);
        }
        match self.config.proxy_server_url() {
            Some(proxy) => {
                tracing::warn!("falling back to proxy server {}", proxy);
                (proxy, true)
            }
            None => {
                tracing::debug!("no proxy server configured, staying on {}", primary);
                (primary, false)
            }
        }
    }

    fn send(&self, target: &str, used_proxy: bool, params: &[(&str, String)]) -> RawResponse {
        tracing::debug!(
            "POST {} action={} item_id={} license={}",
            target,
            self.config.action().provider_action(),
            self.config.item_id(),
            self.config.masked_key()
        );
        let outcome = self.transport.post_form(target, params);
        match &outcome {
            Ok(resp) => tracing::debug!("{} answered HTTP {} ({} bytes)", target, resp.status, resp.body.len()),
            Err(e) => tracing::warn!("license request to {} failed: {}", target, e),
        }
        RawResponse {
            target: target.to_string(),
            used_proxy,
            outcome,
        }
    }
}

impl<T: Transport> LicenseProvider for EddLicenseManager<T> {
    fn validate(&self) -> RawResponse {
        let params = self.request_params();
        match self.fallback {
            FallbackStrategy::Probe => {
                let (target, used_proxy) = self.select_target();
                self.send(target, used_proxy, &params)
            }
            FallbackStrategy::OnFailure => {
                let primary = self.send(self.config.primary_server_url(), false, &params);
                let primary_ok = matches!(&primary.outcome, Ok(resp) if resp.is_ok());
                match self.config.proxy_server_url() {
                    Some(proxy) if !primary_ok => {
                        tracing::warn!("primary licensing server failed, retrying via proxy {}", proxy);
                        self.send(proxy, true, &params)
                    }
                    _ => primary,
                }
            }
        }
    }

    fn interpret(&self, raw: &RawResponse) -> ValidationResult {
        let result = interpret::interpret_response(
            raw,
            self.config.action(),
            self.config.plugin_name(),
            self.formatter.as_ref(),
        );
        tracing::info!(
            "license {} for item {}: success={} status={}",
            self.config.action(),
            self.config.item_id(),
            result.success,
            result.license_status
        );
        result
    }
}
