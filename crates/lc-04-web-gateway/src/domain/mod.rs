//! Domain layer for the web gateway.

pub mod config;
pub mod error;

pub use config::{ConfigError, GatewayConfig, HttpConfig, SecurityConfig, SessionConfig};
pub use error::{ErrorBoundary, GatewayError};
