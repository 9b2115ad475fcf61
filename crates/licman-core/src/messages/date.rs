//! Expiry date parsing and host-locale date rendering.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

/// Default strftime pattern, equivalent to a "F j, Y" site setting.
pub const DEFAULT_DATE_FORMAT: &str = "%B %-d, %Y";

/// Host capability that renders a date the way the site's locale prefers.
pub trait DateFormatter {
    fn format_date(&self, date: NaiveDateTime) -> String;
}

/// Renders dates with a chrono strftime pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrftimeDateFormatter {
    pattern: String,
}

impl StrftimeDateFormatter {
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for StrftimeDateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl DateFormatter for StrftimeDateFormatter {
    fn format_date(&self, date: NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.pattern)).is_ok() {
            return out;
        }
        // Invalid pattern in the site config.
        tracing::warn!("invalid date format {:?}, using ISO date", self.pattern);
        date.format("%Y-%m-%d").to_string()
    }
}

/// Parses an expiry value as reported by the licensing server.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, RFC 3339 and a bare
/// `YYYY-MM-DD`. Returns `None` for anything else, including `lifetime`.
pub fn parse_expiry(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_supported_forms() {
        assert_eq!(parse_expiry("2024-01-01 23:59:59").unwrap().date(), ymd(2024, 1, 1));
        assert_eq!(parse_expiry("2024-01-01T00:00:00").unwrap().date(), ymd(2024, 1, 1));
        assert_eq!(parse_expiry("2024-03-05T10:00:00+02:00").unwrap().date(), ymd(2024, 3, 5));
        assert_eq!(parse_expiry(" 2023-12-31 ").unwrap().date(), ymd(2023, 12, 31));
    }

    #[test]
    fn rejects_unsupported_forms() {
        assert!(parse_expiry("lifetime").is_none());
        assert!(parse_expiry("").is_none());
        assert!(parse_expiry("2024-13-01").is_none());
        assert!(parse_expiry("01/02/2024").is_none());
    }

    #[test]
    fn default_formatter_uses_long_month() {
        let date = parse_expiry("2024-01-01T00:00:00").unwrap();
        assert_eq!(StrftimeDateFormatter::default().format_date(date), "January 1, 2024");
    }

    #[test]
    fn custom_pattern() {
        let date = parse_expiry("2024-07-04").unwrap();
        assert_eq!(StrftimeDateFormatter::new("%d/%m/%Y").format_date(date), "04/07/2024");
    }

    #[test]
    fn invalid_pattern_falls_back_to_iso() {
        let date = parse_expiry("2024-07-04").unwrap();
        assert_eq!(StrftimeDateFormatter::new("%Q").format_date(date), "2024-07-04");
    }
}
