//! Console logging to stderr.
//!
//! WARN+ by default. Set `DEBUG_LOGGING=1` to enable debug output for the
//! narrascope crates (request routes, status codes, stale responses).

use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub fn init() {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    // stderr keeps rendered results on stdout clean
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let filter_directive = if debug_logging {
        "info,narrascope_core=debug,narrascope_cli=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(EnvFilter::new(filter_directive))
        .init();

    tracing::debug!(debug_logging, "narrascope console logging initialized");
}
