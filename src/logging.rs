//! Tracing setup for test binaries

use tracing_subscriber::EnvFilter;

/// Filter directives for harness logging; `RUST_LOG` is the fallback
pub const LOG_ENV: &str = "TESTDB_LOG";

/// Install a fmt subscriber that writes through the test harness.
///
/// Safe to call from every test: only the first call in a process installs
/// anything, later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // Another subscriber may already be installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
