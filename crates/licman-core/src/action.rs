//! Licensing operations understood by the server.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The licensing operation being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LicenseAction {
    Activate,
    Deactivate,
    Check,
}

impl LicenseAction {
    pub const ALL: [LicenseAction; 3] = [
        LicenseAction::Activate,
        LicenseAction::Deactivate,
        LicenseAction::Check,
    ];

    /// Lower-case key; also the success-message key in the message table.
    pub fn as_str(self) -> &'static str {
        match self {
            LicenseAction::Activate => "activate",
            LicenseAction::Deactivate => "deactivate",
            LicenseAction::Check => "check",
        }
    }

    /// Value of the `edd_action` form field, e.g. `activate_license`.
    pub fn provider_action(self) -> String {
        format!("{}_license", self.as_str())
    }
}

impl fmt::Display for LicenseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        LicenseAction::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ConfigError::UnknownAction(s.to_string()))
    }
}
