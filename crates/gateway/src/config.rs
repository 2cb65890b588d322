//! Configuration loading and validation for the broker service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or
//! invalid. Per-platform encryption secrets (`ENCRYPTION_KEY_<PLATFORM>`) are
//! deliberately not part of this struct — they are resolved per request
//! through the `SecretProvider` capability.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::payments::razorpay::DEFAULT_API_BASE;

/// Validated broker service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Merchant key id for the payment processor. **Required.**
    pub razorpay_key_id: String,

    /// Merchant key secret for the payment processor; also keys callback
    /// signature verification. **Required.**
    pub razorpay_key_secret: String,

    /// Base URL of the processor API. Overridable for tests.
    #[serde(default = "default_api_base")]
    pub razorpay_api_base: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}
fn default_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.razorpay_key_id, "RAZORPAY_KEY_ID")?;
        ensure_non_empty(&self.razorpay_key_secret, "RAZORPAY_KEY_SECRET")?;
        ensure_non_empty(&self.razorpay_api_base, "RAZORPAY_API_BASE")?;
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
