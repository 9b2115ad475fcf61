//! Per-attempt license configuration.
//!
//! A `LicenseConfig` is validated once at construction and immutable after
//! that; `with_action` derives a copy for another action.

mod sanitize;

use crate::action::LicenseAction;
use crate::error::ConfigError;
use std::fmt;

pub use sanitize::sanitize_server_url;

/// Everything a provider needs to talk to the licensing server for one key.
#[derive(Clone, PartialEq, Eq)]
pub struct LicenseConfig {
    action: LicenseAction,
    item_id: u64,
    license_key: String,
    plugin_name: String,
    primary_server_url: String,
    proxy_server_url: Option<String>,
}

impl LicenseConfig {
    /// Validates and stores the configuration.
    ///
    /// Fails if `item_id` is not positive or either URL is non-empty but not
    /// an absolute http(s) URL. An empty or absent proxy means no fallback.
    pub fn new(
        action: LicenseAction,
        item_id: i64,
        license_key: &str,
        plugin_name: &str,
        primary_server_url: &str,
        proxy_server_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let item_id = u64::try_from(item_id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ConfigError::InvalidItemId(item_id))?;
        let primary_server_url = sanitize_server_url("primary_server_url", primary_server_url)?;
        let proxy_server_url = match proxy_server_url {
            Some(raw) => Some(sanitize_server_url("proxy_server_url", raw)?),
            None => None,
        }
        .filter(|url| !url.is_empty());

        Ok(Self {
            action,
            item_id,
            license_key: license_key.trim().to_string(),
            plugin_name: plugin_name.to_string(),
            primary_server_url,
            proxy_server_url,
        })
    }

    /// Like [`LicenseConfig::new`] but takes the action as a string.
    pub fn parse(
        action: &str,
        item_id: i64,
        license_key: &str,
        plugin_name: &str,
        primary_server_url: &str,
        proxy_server_url: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let action = action.parse::<LicenseAction>()?;
        Self::new(
            action,
            item_id,
            license_key,
            plugin_name,
            primary_server_url,
            proxy_server_url,
        )
    }

    /// Same configuration for a different action.
    pub fn with_action(&self, action: LicenseAction) -> Self {
        Self {
            action,
            ..self.clone()
        }
    }

    pub fn action(&self) -> LicenseAction {
        self.action
    }

    pub fn item_id(&self) -> u64 {
        self.item_id
    }

    pub fn license_key(&self) -> &str {
        &self.license_key
    }

    pub fn plugin_name(&self) -> &str {
        &self.plugin_name
    }

    pub fn primary_server_url(&self) -> &str {
        &self.primary_server_url
    }

    pub fn proxy_server_url(&self) -> Option<&str> {
        self.proxy_server_url.as_deref()
    }

    /// License key safe for logs: everything but the last four characters masked.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.license_key.chars().collect();
        let visible = chars.len().min(4);
        let hidden = chars.len() - visible;
        let tail: String = chars[hidden..].iter().collect();
        format!("{}{}", "*".repeat(hidden), tail)
    }
}

impl fmt::Debug for LicenseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LicenseConfig")
            .field("action", &self.action)
            .field("item_id", &self.item_id)
            .field("license_key", &self.masked_key())
            .field("plugin_name", &self.plugin_name)
            .field("primary_server_url", &self.primary_server_url)
            .field("proxy_server_url", &self.proxy_server_url)
            .finish()
    }
}
