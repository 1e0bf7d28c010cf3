use unicode_truncate::UnicodeTruncateStr;

use crate::http_probe::ProbeOutcome;
use crate::ranking::RankedEntry;

const MAX_COUNTRY_WIDTH: usize = 20;

fn to_fixed_width(input: &str, width: usize) -> String {
    let (truncated, _) = input.unicode_truncate(width);
    format!("{:<width$}", truncated, width = width)
}

/// One report line: `[country] URL: <url>, Status: <code>, Ping: <secs>s`.
pub fn format_entry(entry: &RankedEntry, country_width: usize) -> String {
    format!(
        "[{}] URL: {}, Status: {}, Ping: {:.2}s",
        to_fixed_width(&entry.endpoint.origin().country, country_width),
        entry.url(),
        entry.status_code,
        entry.elapsed.as_secs_f64()
    )
}

pub fn format_ranking(entries: &[RankedEntry]) -> Vec<String> {
    let country_width = entries
        .iter()
        .map(|e| e.endpoint.origin().country.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_COUNTRY_WIDTH);

    entries
        .iter()
        .map(|entry| format_entry(entry, country_width))
        .collect()
}

/// Log the ranked mirrors, fastest first.
pub fn log_ranking(entries: &[RankedEntry], top_n: usize) {
    if entries.is_empty() {
        log::warn!("No mirror answered with an accepted status.");
        return;
    }

    log::info!("Top {} Up-to-Date Ubuntu Mirrors (HTTP):", top_n);
    for line in format_ranking(entries) {
        log::info!("{}", line);
    }
}

/// Log how many probes got an answer and how many failed.
pub fn log_summary(outcomes: &[ProbeOutcome]) {
    let responded = outcomes.iter().filter(|o| o.is_success()).count();
    log::info!(
        "Probed {} endpoints: {} responded, {} failed.",
        outcomes.len(),
        responded,
        outcomes.len() - responded
    );
}
