//! Structured logging bootstrap
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary (or to the embedding application).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::types::*;

/// Build the filter: `RUST_LOG` wins, otherwise `default_level` for this crate
pub fn build_filter(default_level: &str) -> DocumentResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(default_level)
        .map_err(|e| DocumentError::Config(format!("invalid log level '{}': {}", default_level, e)))
}

/// Install a global formatted subscriber writing to stderr
pub fn init_logging(default_level: &str) -> DocumentResult<()> {
    let filter = build_filter(default_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()
        .map_err(|e| DocumentError::Config(format!("logging already initialised: {}", e)))
}
