use std::time::Duration;

use serde::Deserialize;

pub const LAUNCHPAD_MIRRORS_URL: &str = "https://launchpad.net/ubuntu/+archivemirrors";

/// Settings for a mirrorprobe run.
/// Every field has a default, so an empty (or absent) config file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// The directory page listing the candidate mirrors.
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// Only mirrors whose status column contains this text are probed.
    #[serde(default = "default_status_filter")]
    pub status_filter: String,

    /// The maximum number of probes in flight at any moment.
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Per-probe timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// How many mirrors end up in the ranking.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// The status code a probe must answer with to be ranked.
    /// Defaults to 200 if not specified.
    #[serde(default = "default_accepted_status_code")]
    pub accepted_status_code: u16,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            status_filter: default_status_filter(),
            max_concurrent_requests: default_max_concurrent_requests(),
            timeout_seconds: default_timeout_seconds(),
            top_n: default_top_n(),
            accepted_status_code: default_accepted_status_code(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_source_url() -> String {
    LAUNCHPAD_MIRRORS_URL.to_string()
}

fn default_status_filter() -> String {
    "Up to date".to_string()
}

fn default_max_concurrent_requests() -> usize {
    10
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_top_n() -> usize {
    10
}

fn default_accepted_status_code() -> u16 {
    200
}

fn default_user_agent() -> String {
    concat!("mirrorprobe/", env!("CARGO_PKG_VERSION")).to_string()
}
