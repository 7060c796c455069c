//! Opt-in diagnostic logging, initialized by binaries/tests that want it.
//! The library itself never calls this, it only emits `tracing` events.

use tracing_subscriber::EnvFilter;

/// Installs a global `tracing` subscriber reading `RUST_LOG` (defaulting to
/// `warn`), with timestamps stripped since step counts and levels are the
/// useful signal here, not wall-clock time.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_ansi(true)
        .try_init();
}
