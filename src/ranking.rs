use std::time::Duration;

use crate::http_probe::ProbeOutcome;
use crate::source::Endpoint;

pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_ACCEPTED_STATUS: u16 = 200;

/// A responsive endpoint that made it into the ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub endpoint: Endpoint,
    pub status_code: u16,
    pub elapsed: Duration,
}

impl RankedEntry {
    pub fn url(&self) -> &str {
        self.endpoint.url()
    }
}

/// Pick the fastest accepted endpoints.
///
/// Failures and successes with any status other than `accepted_status` are dropped,
/// the rest is sorted by latency and cut to `top_n`. The sort is stable: equally fast
/// endpoints keep their order from `outcomes`.
pub fn rank(outcomes: &[ProbeOutcome], accepted_status: u16, top_n: usize) -> Vec<RankedEntry> {
    let mut ranked: Vec<RankedEntry> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            ProbeOutcome::Success {
                endpoint,
                status_code,
                elapsed,
            } if *status_code == accepted_status => Some(RankedEntry {
                endpoint: endpoint.clone(),
                status_code: *status_code,
                elapsed: *elapsed,
            }),
            _ => None,
        })
        .collect();

    ranked.sort_by_key(|entry| entry.elapsed);
    ranked.truncate(top_n);
    ranked
}
