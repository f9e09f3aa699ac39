//! Tracing initialisation for embedders and tests.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber. `MODEX_LOG` overrides the default
/// filter (e.g. `MODEX_LOG=modex::catalog=trace`). Calling this more than
/// once is harmless; later calls are no-ops.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env("MODEX_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
