//! Development-time tracing for the CLI and simulator.
//!
//! Diagnostics go to stderr via `RUST_LOG`; command output (reports, section
//! listings) goes to stdout and is unaffected by the filter. The browser
//! binding installs its own subscriber.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the CLI subscriber. `RUST_LOG` selects levels, falling back to
/// `warn`; `sitenav=trace` shows every event and command
/// of a simulation.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry().with(filter).with(stderr).init();
}
