//! Gateway configuration with validation.

use lc_03_page_guard::GraphQlConfig;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// GraphQL service the page guards query
    pub backend: GraphQlConfig,
    /// Session cookie handling
    pub session: SessionConfig,
    /// Response hardening
    pub security: SecurityConfig,
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::InvalidPort);
        }

        if self.http.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "http.request_timeout cannot be 0".into(),
            ));
        }

        let endpoint = self.backend.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.backend.endpoint.clone()));
        }

        if self.backend.timeout.is_zero() || self.backend.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(
                "backend timeouts cannot be 0".into(),
            ));
        }

        if self.security.production && self.session.jwt_secret.is_none() {
            return Err(ConfigError::MissingSecret);
        }

        Ok(())
    }

    /// Get HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3000)
    pub port: u16,
    /// Upper bound for one page request, GraphQL round-trips included
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// HS256 secret of the identity gateway. Without it the route ACL reads
    /// session claims unverified.
    #[serde(skip_serializing)]
    pub jwt_secret: Option<String>,
}

/// Security header configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Production mode: no `unsafe-eval`, narrower frame sources.
    pub production: bool,
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("http.port cannot be 0")]
    InvalidPort,
    /// Backend endpoint is not an http(s) URL
    #[error("invalid GraphQL endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Production mode refuses unverified session tokens
    #[error("session.jwt_secret is required in production")]
    MissingSecret,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http.port, 3000);
        assert_eq!(config.backend.endpoint, "http://gateway/graphql");
        assert!(!config.security.production);
    }

    #[test]
    fn test_config_address() {
        let config = GatewayConfig::default();
        assert_eq!(config.http_addr().port(), 3000);
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = GatewayConfig::default();
        config.backend.endpoint = "gateway:80/graphql".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = GatewayConfig::default();
        config.http.port = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));

        let mut config = GatewayConfig::default();
        config.backend.timeout = Duration::ZERO;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_production_needs_secret() {
        let mut config = GatewayConfig::default();
        config.security.production = true;
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));

        config.session.jwt_secret = Some("s3cret".into());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{"http": {"port": 8080, "request_timeout": "5s"}, "security": {"production": true}}"#,
        )
        .unwrap();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.request_timeout, Duration::from_secs(5));
        assert_eq!(config.http.host, IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        assert_eq!(config.backend, GraphQlConfig::default());
        assert!(config.security.production);
    }
}
