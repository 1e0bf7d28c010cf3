pub mod probe;
pub mod result;

pub use probe::probe_url;
pub use result::ProbeOutcome;

use std::fmt::Write;

/// Render an error together with its whole `source()` chain.
/// reqwest's top-level message rarely names the actual cause (DNS, refused, TLS).
fn report(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        let _ = write!(s, ": Caused by: {}", src);
        err = src;
    }
    s
}
