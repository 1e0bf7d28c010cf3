use std::time::Duration;

use reqwest::Client;
use tokio::time::Instant;

use super::{report, result::ProbeOutcome};
use crate::source::Endpoint;

/// Issue a single GET against `endpoint` and time it.
///
/// The clock runs from just before the request is sent until the response headers
/// are in; the body is never read. Every failure mode (DNS, refused connection, TLS,
/// the `timeout` elapsing) is folded into [`ProbeOutcome::Failure`], so callers never
/// need error handling around a probe.
pub async fn probe_url(client: Client, endpoint: Endpoint, timeout: Duration) -> ProbeOutcome {
    log::info!("Fetching {}...", endpoint.url());

    let start = Instant::now();
    let response = tokio::time::timeout(timeout, client.get(endpoint.url()).send()).await;
    let elapsed = start.elapsed();

    match response {
        Ok(Ok(resp)) => {
            let status_code = resp.status().as_u16();
            log::info!(
                "Successfully fetched {} with status {}.",
                endpoint.url(),
                status_code
            );
            ProbeOutcome::Success {
                endpoint,
                status_code,
                elapsed,
            }
        }
        Ok(Err(e)) => {
            let error = report(&e);
            log::error!("Error fetching {}: {}", endpoint.url(), error);
            ProbeOutcome::Failure { endpoint, error }
        }
        Err(_) => {
            let error = format!("timed out after {:.2}s", timeout.as_secs_f64());
            log::error!("Error fetching {}: {}", endpoint.url(), error);
            ProbeOutcome::Failure { endpoint, error }
        }
    }
}
