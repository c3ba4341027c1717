//! LC-04 Web Gateway - HTTP surface of the clubs portal access layer.
//!
//! Serves the guarded management pages as JSON view models. Every request
//! passes the route ACL before a handler runs; handlers then ask the page
//! guards whether the viewer may see the record.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    WEB GATEWAY (lc-04)                       │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                  Middleware Stack                      │  │
//! │  │  Tracing → SecurityHeaders → Timeout → RouteAcl        │  │
//! │  └──────────────────────────┬─────────────────────────────┘  │
//! │                             │                                │
//! │  ┌──────────────────────────┴─────────────────────────────┐  │
//! │  │              Page handlers (lc-03 guards)              │  │
//! │  └──────────────────────────┬─────────────────────────────┘  │
//! └─────────────────────────────┼────────────────────────────────┘
//!                               │ session cookie forwarded
//!                               ▼
//!                        GraphQL service
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use lc_04_web_gateway::{GatewayConfig, WebGateway};
//!
//! let gateway = WebGateway::new(GatewayConfig::default(), backend)?;
//! gateway.serve(shutdown_signal()).await?;
//! ```
//!
//! # Security
//!
//! - Content-Security-Policy with a fresh nonce on every response
//! - Session tokens verified with HS256 when a secret is configured,
//!   required in production
//! - Denied and missing records share one response

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use domain::{
    ConfigError, ErrorBoundary, GatewayConfig, GatewayError, HttpConfig, SecurityConfig,
    SessionConfig,
};
pub use handlers::{AppState, PageResponse};
pub use service::{build_router, WebGateway};

/// Crate version, reported by `/health`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
