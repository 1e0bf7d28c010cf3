//! Bounded concurrent dispatch of probes.
//!
//! Every probe unit runs in its own task, but may only start its request once it
//! holds one of `concurrency` admission permits. The permit is an owned guard
//! dropped when the unit's future returns, so it is released on success, failure
//! and timeout alike. Tokio's semaphore hands out permits in FIFO order, so no
//! queued unit is postponed indefinitely.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::Semaphore;

use crate::http_probe::{ProbeOutcome, probe_url};
use crate::source::{Endpoint, Mirror, Origin};

pub const DEFAULT_CONCURRENCY: usize = 10;

/// Expand mirrors into probe units, one per supported link.
///
/// Links failing the scheme predicate (relative paths, rsync, ftp) are dropped here
/// and never reach the dispatcher. Order follows the mirrors, then their links.
pub fn probe_units(mirrors: &[Mirror]) -> Vec<Endpoint> {
    let mut units = Vec::new();
    for mirror in mirrors {
        let origin = Arc::new(Origin::from(mirror));
        for link in &mirror.links {
            match Endpoint::parse(link, origin.clone()) {
                Some(endpoint) => units.push(endpoint),
                None => log::debug!("Skipping unsupported link {} of {}", link, mirror.name),
            }
        }
    }
    units
}

/// Runs probe units with at most `concurrency` of them in flight.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    concurrency: usize,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY)
    }
}

impl Dispatcher {
    /// A ceiling of 0 is treated as 1.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probe every endpoint over HTTP with the shared `client`.
    pub async fn probe_all(
        &self,
        client: &Client,
        endpoints: Vec<Endpoint>,
        timeout: Duration,
    ) -> Vec<ProbeOutcome> {
        let client = client.clone();
        self.dispatch(endpoints, move |endpoint| {
            probe_url(client.clone(), endpoint, timeout)
        })
        .await
    }

    /// Run `probe` once per endpoint under the concurrency ceiling and wait for all of them.
    ///
    /// Returns exactly one outcome per endpoint, in submission order. A unit whose task
    /// dies (a panic in `probe`) is reported as a `Failure` rather than dropped, and
    /// never affects the other units.
    pub async fn dispatch<F, Fut>(&self, endpoints: Vec<Endpoint>, probe: F) -> Vec<ProbeOutcome>
    where
        F: Fn(Endpoint) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ProbeOutcome> + Send + 'static,
    {
        let permits = Arc::new(Semaphore::new(self.concurrency));
        let probe = Arc::new(probe);

        let handles: Vec<_> = endpoints
            .into_iter()
            .map(|endpoint| {
                let permits = permits.clone();
                let probe = probe.clone();
                let unit = endpoint.clone();
                let handle = tokio::spawn(async move {
                    // The semaphore is owned by this call and never closed.
                    let _permit = permits.acquire_owned().await.ok();
                    probe(unit).await
                });
                (endpoint, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (endpoint, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    log::error!("Probe task for {} did not complete: {}", endpoint.url(), e);
                    outcomes.push(ProbeOutcome::Failure {
                        endpoint,
                        error: format!("probe task aborted: {e}"),
                    });
                }
            }
        }
        outcomes
    }
}
