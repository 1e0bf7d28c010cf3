use std::time::Duration;

use crate::source::Endpoint;

/// The settled result of probing one endpoint.
///
/// A `Success` means an HTTP response arrived, whatever its status. Whether that
/// status is good enough to be ranked is decided later by the ranker.
/// A `Failure` deliberately carries no duration: a probe that never got an answer
/// has no latency, and must never rank as a zero-latency mirror.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Success {
        endpoint: Endpoint,
        status_code: u16,
        elapsed: Duration,
    },
    Failure {
        endpoint: Endpoint,
        error: String,
    },
}

impl ProbeOutcome {
    pub fn endpoint(&self) -> &Endpoint {
        match self {
            ProbeOutcome::Success { endpoint, .. } | ProbeOutcome::Failure { endpoint, .. } => {
                endpoint
            }
        }
    }

    pub fn url(&self) -> &str {
        self.endpoint().url()
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Success { status_code, .. } => Some(*status_code),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ProbeOutcome::Success { elapsed, .. } => Some(*elapsed),
            ProbeOutcome::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }
}
