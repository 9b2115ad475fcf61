//! CLI command handlers.

mod completions;
mod license;

pub use completions::run_completions;
pub use license::run_license;
