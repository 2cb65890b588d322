//! Tracing subscriber setup: structured JSON logs with env-filter control.
//!
//! # Telemetry invariants
//!
//! - **No key material or payload plaintext** must appear in any span
//!   attribute or log field.
//! - Log level is configurable via `RUST_LOG`, falling back to the
//!   `LOG_LEVEL` configuration value (default: `info`).

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed.
pub fn init_telemetry(log_level: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
