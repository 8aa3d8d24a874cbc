//! Logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Set up console logging. `RUST_LOG` takes precedence over `level`.
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Only the first call installs a subscriber
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
