//! `licman activate|deactivate|check <key>` – run one license action.

use anyhow::{bail, Context, Result};
use licman_core::config;
use licman_core::{
    CurlTransport, EddLicenseManager, LicenseAction, LicenseConfig, LicenseProvider,
    StrftimeDateFormatter,
};

use crate::cli::LicenseArgs;

pub fn run_license(action: LicenseAction, args: &LicenseArgs) -> Result<bool> {
    let mut cfg = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    args.apply_overrides(&mut cfg);
    tracing::debug!("effective config: {:?}", cfg);

    let item_id = cfg
        .item_id
        .context("no item id configured; pass --item-id or set item_id in config.toml")?;
    require_site_url(&cfg.site_url)?;
    let license = LicenseConfig::new(
        action,
        item_id,
        &args.license_key,
        &cfg.plugin_name,
        &cfg.primary_server_url,
        cfg.proxy_server_url.as_deref(),
    )?;

    let transport = CurlTransport::new(cfg.http.transport_options());
    let manager = EddLicenseManager::new(license, &cfg.site_url, transport)
        .with_fallback(cfg.fallback)
        .with_date_formatter(Box::new(StrftimeDateFormatter::new(&cfg.date_format)));

    let result = manager.run();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.message);
    }
    Ok(result.success)
}

/// The licensing server binds activations to `url`; an empty one is rejected server-side.
fn require_site_url(site_url: &str) -> Result<()> {
    if site_url.trim().is_empty() {
        bail!("no site URL configured; pass --site-url or set site_url in config.toml");
    }
    Ok(())
}
