//! Gateway error types and the error boundary body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lc_03_page_guard::GuardError;
use serde::Serialize;

/// Gateway-level errors (startup and serving)
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),

    /// Route ACL could not be compiled
    #[error("route ACL error: {0}")]
    Acl(#[from] lc_02_route_acl::AclError),

    /// GraphQL client could not be built
    #[error("backend client error: {0}")]
    Backend(#[from] lc_03_page_guard::BackendError),

    /// Server socket bind error
    #[error("server bind error: {0}")]
    Bind(#[source] std::io::Error),

    /// Server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Body of the error boundary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBoundary {
    pub title: String,
    /// Diagnostic text for the reload prompt.
    pub details: String,
}

impl From<&GuardError> for ErrorBoundary {
    fn from(error: &GuardError) -> Self {
        Self {
            title: error.title().to_string(),
            details: error.to_string(),
        }
    }
}

impl IntoResponse for ErrorBoundary {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lc_03_page_guard::BackendError;

    #[test]
    fn test_boundary_from_guard_error() {
        let err = GuardError::backend("Event", BackendError::Status(502));
        let boundary = ErrorBoundary::from(&err);
        assert_eq!(boundary.title, "Backend unavailable");
        assert!(boundary.details.contains("Event"));
        assert!(boundary.details.contains("502"));
    }

    #[test]
    fn test_boundary_status() {
        let boundary = ErrorBoundary {
            title: "t".into(),
            details: "d".into(),
        };
        assert_eq!(
            boundary.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_config_error_converts() {
        let err: GatewayError = super::super::config::ConfigError::InvalidPort.into();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
