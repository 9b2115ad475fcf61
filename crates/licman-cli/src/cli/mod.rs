//! CLI for the licman license client.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use licman_core::config::LicmanConfig;
use licman_core::{FallbackStrategy, LicenseAction};
use std::path::PathBuf;

use commands::{run_completions, run_license};

/// Top-level CLI for licman.
#[derive(Debug, Parser)]
#[command(name = "licman")]
#[command(about = "Activate, deactivate and check plugin licenses against an EDD licensing server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Activate a license key for this site.
    Activate(LicenseArgs),

    /// Deactivate a license key for this site.
    Deactivate(LicenseArgs),

    /// Check the current status of a license key.
    Check(LicenseArgs),

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Arguments shared by the license subcommands. Flags override config.toml.
#[derive(Debug, Clone, Args)]
pub struct LicenseArgs {
    /// License key to send to the server.
    pub license_key: String,

    /// Item id of the plugin on the licensing server.
    #[arg(long, allow_negative_numbers = true)]
    pub item_id: Option<i64>,

    /// Plugin name used in messages.
    #[arg(long)]
    pub plugin_name: Option<String>,

    /// Primary licensing server URL.
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Proxy licensing server URL, used when the primary is unreachable.
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Home URL of the site the license is for.
    #[arg(long, value_name = "URL")]
    pub site_url: Option<String>,

    /// Read configuration from this file instead of ~/.config/licman/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Skip TLS certificate verification (self-signed licensing servers).
    #[arg(long)]
    pub insecure: bool,

    /// POST to the primary first and retry via the proxy on failure, instead of probing.
    #[arg(long)]
    pub fallback_on_failure: bool,

    /// Print the full result as JSON instead of just the message.
    #[arg(long)]
    pub json: bool,
}

impl LicenseArgs {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, cfg: &mut LicmanConfig) {
        if let Some(id) = self.item_id {
            cfg.item_id = Some(id);
        }
        if let Some(name) = &self.plugin_name {
            cfg.plugin_name = name.clone();
        }
        if let Some(server) = &self.server {
            cfg.primary_server_url = server.clone();
        }
        if let Some(proxy) = &self.proxy {
            cfg.proxy_server_url = Some(proxy.clone());
        }
        if let Some(site) = &self.site_url {
            cfg.site_url = site.clone();
        }
        if self.insecure {
            cfg.http.verify_tls = false;
        }
        if self.fallback_on_failure {
            cfg.fallback = FallbackStrategy::OnFailure;
        }
    }
}

impl CliCommand {
    /// Returns whether the licensing server reported success.
    pub fn run_from_args() -> Result<bool> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Activate(args) => run_license(LicenseAction::Activate, &args),
            CliCommand::Deactivate(args) => run_license(LicenseAction::Deactivate, &args),
            CliCommand::Check(args) => run_license(LicenseAction::Check, &args),
            CliCommand::Completions { shell } => {
                run_completions(shell);
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests;
