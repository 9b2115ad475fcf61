//! Server URL sanitization.

use crate::error::ConfigError;
use url::Url;

/// Sanitizes a configured server URL.
///
/// - Surrounding whitespace is trimmed; an empty result stays empty
/// - Anything else must be an absolute `http`/`https` URL with a host
/// - The returned value is the normalized form (e.g. trailing `/` on a bare host)
pub fn sanitize_server_url(field: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let invalid = || ConfigError::InvalidUrl {
        field,
        value: raw.to_string(),
    };

    let parsed = Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(parsed.to_string())
}
