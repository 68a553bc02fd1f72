pub mod config;
pub mod edsm;
pub mod error;
pub mod format;
pub mod journal;
pub mod state;
pub mod zone;

/// Shown in the preferences window.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
