//! Run-fatal error types.
//!
//! Per-probe problems never show up here: they are folded into
//! [`ProbeOutcome::Failure`](crate::http_probe::result::ProbeOutcome) by the probe itself.
//! Only failures that leave nothing to probe (the directory page, the
//! configuration, the HTTP client) abort the run.

use thiserror::Error;

/// Top-level error for a mirrorprobe run
#[derive(Error, Debug)]
pub enum Error {
    /// Mirror directory could not be fetched or parsed
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Settings could not be loaded or are invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The shared HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

/// Errors raised while retrieving the mirror directory
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("malformed mirror directory: {0}")]
    Parse(String),

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}

/// Errors raised while loading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("environment variable {key}={value:?} is not valid: {reason}")]
    InvalidEnv {
        key: String,
        value: String,
        reason: String,
    },

    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Result type alias for fatal errors
pub type Result<T> = std::result::Result<T, Error>;
