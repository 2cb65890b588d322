//! `gateway` — payment broker service entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (tracing subscriber).
//! 3. Build the payment-processor client.
//! 4. Build the Axum router and start the HTTP server.

mod codec;
mod config;
mod crypto;
mod payments;
mod server;
mod telemetry;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use config::Config;
use crypto::EnvSecrets;
use payments::RazorpayClient;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = cfg.port,
        "payment broker starting"
    );

    // -----------------------------------------------------------------------
    // 3. Payment processor client
    // -----------------------------------------------------------------------
    let processor = RazorpayClient::new(
        cfg.razorpay_api_base.clone(),
        cfg.razorpay_key_id.clone(),
        cfg.razorpay_key_secret.clone(),
    );

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(
        Arc::new(EnvSecrets),
        Arc::new(processor),
        cfg.razorpay_key_secret.clone(),
    );
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
