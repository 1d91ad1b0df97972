//! Logging setup helpers
//!
//! Thin wrapper around `tracing-subscriber` so binaries and tests get the
//! same formatting. Honors `RUST_LOG` when set.

use tracing_subscriber::EnvFilter;

/// Initialize logging with an `info` default level
pub fn init() {
    init_with_default("info");
}

/// Initialize logging with an explicit default filter
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_with_default(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
