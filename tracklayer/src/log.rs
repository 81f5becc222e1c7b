//! Tracing bootstrap for binaries and tests.
//!
//! The library itself only emits through the `tracing` macros; wiring a
//! subscriber is the consumer's call. This helper covers the common case:
//! env-filtered, compact console output, `RUST_LOG` honored.

use tracing_subscriber::EnvFilter;

/// Install a compact console subscriber honoring `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call more than
/// once — later calls are no-ops, so tests can call it unconditionally.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .try_init();
}
