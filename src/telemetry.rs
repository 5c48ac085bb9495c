//! Logging setup.

/// Install a `tracing` fmt subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
