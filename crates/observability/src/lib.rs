//! Tracing/logging setup shared by storefront hosts.

use tracing_subscriber::EnvFilter;

/// Initialize process-wide tracing/logging.
///
/// Structured JSON output, filter configurable via `RUST_LOG` (defaults to
/// `info` for everything and `debug` for the storefront crates). Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,coldfront_storefront=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
