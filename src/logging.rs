// src/logging.rs
//! Log output setup for the binary
//!
//! Logs go to stderr so a key file written to stdout stays clean. `RUST_LOG`
//! selects the level, default `warn`.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
