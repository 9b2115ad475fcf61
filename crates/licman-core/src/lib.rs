//! Licman core: validate plugin licenses against an EDD-style licensing server.
//!
//! The flow is two-phase. A [`LicenseProvider`] first performs the network
//! work (`validate`), producing a [`RawResponse`], then turns that raw
//! response into a normalized [`ValidationResult`] (`interpret`).

pub mod action;
pub mod config;
pub mod edd;
pub mod error;
pub mod logging;
pub mod messages;
pub mod provider;
pub mod settings;
pub mod transport;

pub use action::LicenseAction;
pub use edd::{EddLicenseManager, FallbackStrategy};
pub use error::ConfigError;
pub use messages::{build_error_messages, DateFormatter, ErrorMessageTable, StrftimeDateFormatter};
pub use provider::{LicenseProvider, RawResponse, ValidationResult};
pub use settings::LicenseConfig;
pub use transport::{CurlTransport, HttpResponse, Transport, TransportError, TransportOptions};
