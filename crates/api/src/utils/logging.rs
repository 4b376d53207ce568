//! Tracing setup and request outcome logging

use std::time::Duration;

use bizkit_domain::utils::duration_millis;
use bizkit_domain::BizkitError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. `BIZKIT_LOG_FORMAT=json`
/// switches to one JSON object per line.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("BIZKIT_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    // try_init: a second call (tests) leaves the first subscriber in place.
    let _ = if json { builder.json().try_init() } else { builder.try_init() };
}

/// Log the outcome of a request with structured fields.
///
/// `command` is a stable identifier such as `"business::get"`; callers must
/// not pass user data in it.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, success: bool) {
    let duration_ms = duration_millis(elapsed);

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(command, duration_ms, "command_execution_failure");
    }
}

/// Convert a `BizkitError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &BizkitError) -> &'static str {
    error.code()
}
