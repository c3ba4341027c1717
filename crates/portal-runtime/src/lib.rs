//! # Portal Runtime
//!
//! Startup plumbing for the `portal-runtime` binary.
//!
//! ## Startup Sequence
//!
//! 1. Read the TOML configuration file (defaults when none is given)
//! 2. Overlay environment variables
//! 3. Validate
//! 4. Initialise telemetry
//! 5. Build the GraphQL backend and the web gateway
//! 6. Serve until Ctrl+C

use anyhow::{Context, Result};
use lc_04_web_gateway::GatewayConfig;
use std::path::Path;
use tracing::{info, warn};

/// Environment variables read on top of the configuration file.
pub mod env {
    pub const GRAPHQL_ENDPOINT: &str = "GRAPHQL_ENDPOINT";
    pub const HTTP_PORT: &str = "LC_HTTP_PORT";
    pub const JWT_SECRET: &str = "LC_JWT_SECRET";
    pub const PRODUCTION: &str = "LC_PRODUCTION";
}

/// Parse a TOML configuration document. Missing sections keep their defaults.
pub fn parse_config(text: &str) -> Result<GatewayConfig> {
    toml::from_str(text).context("Invalid gateway configuration")
}

/// Overlay environment overrides read through `var`.
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(
    config: &mut GatewayConfig,
    var: impl Fn(&str) -> Option<String>,
) {
    if let Some(endpoint) = var(env::GRAPHQL_ENDPOINT) {
        config.backend.endpoint = endpoint;
    }

    if let Some(port) = var(env::HTTP_PORT) {
        match port.parse() {
            Ok(p) => config.http.port = p,
            Err(_) => warn!(value = %port, "{} is not a port number", env::HTTP_PORT),
        }
    }

    if let Some(secret) = var(env::JWT_SECRET) {
        if !secret.is_empty() {
            config.session.jwt_secret = Some(secret);
        }
    }

    if let Some(flag) = var(env::PRODUCTION) {
        match flag.to_lowercase().as_str() {
            "1" | "true" | "yes" => config.security.production = true,
            "0" | "false" | "no" => config.security.production = false,
            _ => warn!(value = %flag, "{} is not a boolean", env::PRODUCTION),
        }
    }
}

/// Load, overlay and validate the gateway configuration.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config = parse_config(&text)?;
            info!(path = %path.display(), "Loaded configuration file");
            config
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config.validate().context("Configuration rejected")?;

    Ok(config)
}
