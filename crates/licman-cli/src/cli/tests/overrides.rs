//! Tests for applying flag overrides to the loaded config.

use super::{license_args, parse};
use licman_core::config::LicmanConfig;
use licman_core::FallbackStrategy;

#[test]
fn flags_override_config_values() {
    let mut cfg = LicmanConfig {
        plugin_name: "From File".to_string(),
        item_id: Some(1),
        primary_server_url: "https://file.example.com".to_string(),
        ..LicmanConfig::default()
    };
    let args = license_args(parse(&[
        "licman",
        "activate",
        "k",
        "--item-id",
        "2",
        "--server",
        "https://flag.example.com",
        "--insecure",
        "--fallback-on-failure",
    ]));
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.item_id, Some(2));
    assert_eq!(cfg.primary_server_url, "https://flag.example.com");
    assert_eq!(cfg.plugin_name, "From File");
    assert!(!cfg.http.verify_tls);
    assert_eq!(cfg.fallback, FallbackStrategy::OnFailure);
}

#[test]
fn absent_flags_leave_config_untouched() {
    let original = LicmanConfig {
        proxy_server_url: Some("https://proxy.example.com".to_string()),
        site_url: "https://shop.example.org".to_string(),
        ..LicmanConfig::default()
    };
    let mut cfg = original.clone();
    let args = license_args(parse(&["licman", "check", "k"]));
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg, original);
}
