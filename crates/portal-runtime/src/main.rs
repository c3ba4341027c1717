//! # Portal Runtime
//!
//! Entry point for the clubs portal access layer: the web gateway in front
//! of the GraphQL service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use lc_03_page_guard::GraphQlBackend;
use lc_04_web_gateway::WebGateway;
use life_telemetry::{init_telemetry, TelemetryConfig};
use portal_runtime::load_config;

/// Life portal access layer
#[derive(Parser, Debug)]
#[command(name = "portal-runtime")]
#[command(version, about = "Route ACL, page guards and web gateway for the clubs portal")]
struct Args {
    /// Gateway configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, env = "LC_CONFIG")]
    config: Option<PathBuf>,
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let telemetry = TelemetryConfig::from_env();
    let _telemetry = init_telemetry(telemetry).context("Failed to initialise telemetry")?;

    let config = load_config(args.config.as_deref())?;

    info!("===========================================");
    info!("  Life Portal Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let backend =
        GraphQlBackend::new(config.backend.clone()).context("Failed to build GraphQL client")?;
    let gateway =
        WebGateway::new(config, Arc::new(backend)).context("Failed to build web gateway")?;

    gateway.serve(shutdown_signal()).await?;

    Ok(())
}
