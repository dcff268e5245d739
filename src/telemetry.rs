//! Tracing initialization for binaries and tests.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Reads the filter from `RUST_LOG`, defaulting to `info` for this crate.
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ad_roles=info"));
    let _ = fmt().with_env_filter(filter).try_init();
}
