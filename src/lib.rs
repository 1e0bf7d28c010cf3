//! mirrorprobe - find the fastest responsive Ubuntu archive mirrors
//!
//! The run is a straight pipeline: the mirror directory page is fetched and parsed
//! into mirrors, every http(s) link becomes a probe unit, the units are probed with
//! bounded concurrency, and the accepted responses are ranked by latency.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http_probe;
pub mod ranking;
pub mod report;
pub mod source;

#[cfg(test)]
pub(crate) mod test_server;

pub use config::Settings;
pub use dispatcher::{Dispatcher, probe_units};
pub use error::{ConfigError, Error, Result, SourceError};
pub use http_probe::{ProbeOutcome, probe_url};
pub use ranking::{RankedEntry, rank};
pub use source::{Endpoint, Mirror, Origin};

use reqwest::Client;

/// Discover, probe and rank the mirrors described by `settings`.
///
/// Only the directory fetch and parse can fail; probe failures just leave the
/// mirror out of the ranking.
pub async fn run(client: &Client, settings: &Settings) -> Result<Vec<RankedEntry>> {
    let mirrors =
        source::get_up_to_date_mirrors(client, &settings.source_url, &settings.status_filter)
            .await?;

    let units = probe_units(&mirrors);
    log::info!("Starting to fetch mirror statuses and ping times...");
    let outcomes = Dispatcher::new(settings.max_concurrent_requests)
        .probe_all(client, units, settings.timeout())
        .await;
    report::log_summary(&outcomes);

    Ok(rank(&outcomes, settings.accepted_status_code, settings.top_n))
}
