//! Tracing setup for wizard runs

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Default directives for a wizard run. Per-tool dispatch detail is the
/// interesting part of a run, so `vault_tools` stays at debug while
/// everything else logs at info.
const DEFAULT_FILTER: &str = "info,vault_tools=debug";

/// Install the global tracing subscriber.
///
/// The `RUST_LOG` environment variable, when set, replaces the default
/// filter wholesale.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer().with_target(true).with_level(true).compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
