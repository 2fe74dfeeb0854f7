//! Structured logging for the drop handler.
//!
//! Log level is read from `RUST_LOG` and defaults to `info`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn filter() -> EnvFilter {
    parse_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Falls back to `info` when the directives are absent or unparsable.
fn parse_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Initialize human-readable logging for local runs.
///
/// # Example
/// ```no_run
/// use jedi_core::logging;
///
/// logging::init();
/// tracing::info!("Replaying drop event");
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_target(true))
        .init();
}

/// Initialize JSON logging, one object per line, for the function runtime.
///
/// The runtime stamps every line itself, so timestamps are omitted.
///
/// # Example
/// ```no_run
/// use jedi_core::logging;
///
/// logging::init_json();
/// tracing::info!(bucket = "jedi-drop", "Handler started");
/// ```
pub fn init_json() {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().json().with_target(true).without_time())
        .init();
}
