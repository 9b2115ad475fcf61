//! User-facing messages keyed by action or server error code.
//!
//! The table is rebuilt for every interpretation because the `expired`
//! entry embeds the expiry date reported by the server.

mod date;

use std::collections::BTreeMap;

pub use date::{parse_expiry, DateFormatter, StrftimeDateFormatter, DEFAULT_DATE_FORMAT};

/// Key of the fallback message.
pub const DEFAULT_KEY: &str = "default";

/// Key of the parameterized expiry message.
pub const EXPIRED_KEY: &str = "expired";

/// Mapping from action key or server error code to message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessageTable {
    entries: BTreeMap<String, String>,
}

impl ErrorMessageTable {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Message for `key`, or the `default` message when the key is unmapped.
    pub fn lookup_or_default(&self, key: &str) -> String {
        self.get(key)
            .unwrap_or_else(|| self.default_message())
            .to_string()
    }

    pub fn default_message(&self) -> &str {
        self.get(DEFAULT_KEY).unwrap_or(DEFAULT_MESSAGE)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const DEFAULT_MESSAGE: &str = "An unknown error occurred, please try again.";

const FIXED_MESSAGES: [(&str, &str); 11] = [
    ("activate", "Your license has been successfully activated."),
    ("deactivate", "Your license has been successfully deactivated."),
    ("check", "Your license has been successfully validated."),
    ("revoked", "Your license key has been disabled."),
    ("missing", "Your license key has been disabled."),
    ("invalid", "Your license is not active for this URL."),
    ("site_inactive", "Your license is not active for this URL."),
    ("no_activations_left", "Your license key has reached its activation limit."),
    ("deactivated", "Your license successfully deactivate."),
    ("failed", "Your license deactivation failed."),
    (DEFAULT_KEY, DEFAULT_MESSAGE),
];

/// Keys always present in a table returned by [`build_error_messages`].
pub const FIXED_KEYS: [&str; 12] = [
    "activate",
    "deactivate",
    "check",
    "revoked",
    "missing",
    "invalid",
    "site_inactive",
    "item_name_mismatch",
    "no_activations_left",
    "deactivated",
    "failed",
    DEFAULT_KEY,
];

/// Builds the message table for one interpretation.
///
/// `item_name_mismatch` names the plugin. When `response_expiry` is present
/// and parses as a date, an `expired` entry is added with the date rendered
/// by `formatter`; otherwise that key is left out and lookups of `expired`
/// fall back to `default`.
pub fn build_error_messages(
    plugin_name: &str,
    response_expiry: Option<&str>,
    formatter: &dyn DateFormatter,
) -> ErrorMessageTable {
    let mut entries: BTreeMap<String, String> = FIXED_MESSAGES
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    entries.insert(
        "item_name_mismatch".to_string(),
        format!("This appears to be an invalid license key for {}.", plugin_name),
    );

    if let Some(expires) = response_expiry.and_then(parse_expiry) {
        entries.insert(
            EXPIRED_KEY.to_string(),
            format!("Your license key expired on {}.", formatter.format_date(expires)),
        );
    } else if let Some(raw) = response_expiry.filter(|s| !s.trim().is_empty()) {
        tracing::debug!("ignoring unparseable license expiry {:?}", raw);
    }

    ErrorMessageTable { entries }
}
