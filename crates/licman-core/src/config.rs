use crate::edd::FallbackStrategy;
use crate::messages::DEFAULT_DATE_FORMAT;
use crate::transport::{TransportOptions, DEFAULT_MAX_RESPONSE_BYTES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP settings (optional `[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout in seconds for the license POST.
    pub request_timeout_secs: u64,
    /// Timeout in seconds for the primary server reachability probe.
    pub probe_timeout_secs: u64,
    /// Connect timeout in seconds, applied to both requests.
    pub connect_timeout_secs: u64,
    /// Verify TLS certificates. Set to false only for self-signed licensing endpoints.
    pub verify_tls: bool,
    /// Largest accepted license response body, in bytes.
    pub max_response_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            probe_timeout_secs: 10,
            connect_timeout_secs: 10,
            verify_tls: true,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl HttpConfig {
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            verify_tls: self.verify_tls,
            max_response_bytes: self.max_response_bytes,
        }
    }
}

/// Global configuration loaded from `~/.config/licman/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicmanConfig {
    /// Plugin name used in the item-name-mismatch message.
    pub plugin_name: String,
    /// Item id of the plugin on the licensing server.
    pub item_id: Option<i64>,
    /// First-choice licensing endpoint.
    pub primary_server_url: String,
    /// Fallback endpoint used when the primary is unreachable.
    pub proxy_server_url: Option<String>,
    /// Public home URL of the site the license is activated for.
    pub site_url: String,
    /// strftime pattern for dates in messages.
    pub date_format: String,
    /// "probe" (default) or "on_failure".
    pub fallback: FallbackStrategy,
    pub http: HttpConfig,
}

impl Default for LicmanConfig {
    fn default() -> Self {
        Self {
            plugin_name: String::new(),
            item_id: None,
            primary_server_url: String::new(),
            proxy_server_url: None,
            site_url: String::new(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            fallback: FallbackStrategy::default(),
            http: HttpConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("licman")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LicmanConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = LicmanConfig::default();
        write_to(&path, &default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<LicmanConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LicmanConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

pub fn write_to(path: &Path, cfg: &LicmanConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = LicmanConfig::default();
        assert_eq!(cfg.http.request_timeout_secs, 15);
        assert_eq!(cfg.http.probe_timeout_secs, 10);
        assert!(cfg.http.verify_tls);
        assert_eq!(cfg.fallback, FallbackStrategy::Probe);
        assert_eq!(cfg.date_format, "%B %-d, %Y");
        assert!(cfg.item_id.is_none());
        assert!(cfg.proxy_server_url.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let mut cfg = LicmanConfig::default();
        cfg.item_id = Some(1234);
        cfg.proxy_server_url = Some("https://proxy.example.com".to_string());
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: LicmanConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            plugin_name = "Product Feed Manager"
            item_id = 35
            primary_server_url = "https://license.example.com"
            proxy_server_url = "https://proxy.example.com/edd"
            site_url = "https://shop.example.org"
            fallback = "on_failure"

            [http]
            request_timeout_secs = 20
            verify_tls = false
        "#;
        let cfg: LicmanConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.plugin_name, "Product Feed Manager");
        assert_eq!(cfg.item_id, Some(35));
        assert_eq!(cfg.fallback, FallbackStrategy::OnFailure);
        assert_eq!(cfg.http.request_timeout_secs, 20);
        // Unset keys in [http] keep their defaults.
        assert_eq!(cfg.http.probe_timeout_secs, 10);
        assert!(!cfg.http.verify_tls);
        assert_eq!(cfg.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn transport_options_from_http_config() {
        let http = HttpConfig {
            request_timeout_secs: 30,
            probe_timeout_secs: 5,
            connect_timeout_secs: 3,
            verify_tls: false,
            max_response_bytes: 2048,
        };
        let o = http.transport_options();
        assert_eq!(o.request_timeout, Duration::from_secs(30));
        assert_eq!(o.probe_timeout, Duration::from_secs(5));
        assert_eq!(o.connect_timeout, Duration::from_secs(3));
        assert!(!o.verify_tls);
        assert_eq!(o.max_response_bytes, 2048);
    }

    #[test]
    fn load_from_and_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = LicmanConfig::default();
        cfg.plugin_name = "Feeds".to_string();
        write_to(&path, &cfg).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.plugin_name, "Feeds");
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{:#}", err).contains("nope.toml"));
    }
}
