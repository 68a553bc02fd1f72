//! Error types.
//!
//! None of these ever reach the eframe loop: each event handler maps its
//! failure to a display marker and logs it.

use std::path::PathBuf;

/// A journal record that could not be turned into a star observation.
#[derive(Debug, thiserror::Error)]
pub enum ScanParseError {
    #[error("invalid journal record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scan record has no `{0}`")]
    Missing(&'static str),
    #[error("scan field `{field}` is not a number: {value}")]
    NotNumeric { field: &'static str, value: String },
    #[error("scan field `{field}` must be positive: {value}")]
    NotPositive { field: &'static str, value: String },
}

/// An EDSM lookup that produced no usable response.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("client error: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("EDSM returned HTTP {0}")]
    Status(u16),
    #[error("failed to read body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("cannot start lookup thread: {0}")]
    Worker(#[source] std::io::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialise settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
