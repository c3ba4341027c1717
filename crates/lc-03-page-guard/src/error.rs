//! Error types for the page guards.
//!
//! A GraphQL `errors` array is an expected answer: the guards inspect it and
//! usually turn it into "record absent". Every other failure aborts the page
//! and reaches the gateway's error boundary as a [`GuardError`].

use shared_types::UpstreamError;
use thiserror::Error;

/// Failure of one call to the GraphQL service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The service answered with an `errors` array.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("GraphQL service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer without a readable GraphQL body.
    #[error("GraphQL service answered HTTP {0}")]
    Status(u16),

    #[error("Failed to decode GraphQL response: {0}")]
    Decode(String),
}

impl BackendError {
    /// The GraphQL error, when the service answered with one.
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            BackendError::Upstream(e) => Some(e),
            _ => None,
        }
    }

    /// Label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Upstream(_) => "graphql",
            BackendError::Transport(_) => "transport",
            BackendError::Status(_) => "status",
            BackendError::Decode(_) => "decode",
        }
    }
}

/// Failure that aborts a guarded page.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("{operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BackendError,
    },
}

impl GuardError {
    pub fn backend(operation: &'static str, source: BackendError) -> Self {
        GuardError::Backend { operation, source }
    }

    /// Short title shown by the error boundary.
    pub fn title(&self) -> &'static str {
        match self {
            GuardError::Backend { .. } => "Backend unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_accessor() {
        let err = BackendError::from(UpstreamError::graphql("Event not found"));
        assert!(err.upstream().is_some_and(|e| e.is_event_not_found()));
        assert_eq!(err.kind(), "graphql");
        assert!(BackendError::Status(502).upstream().is_none());
    }

    #[test]
    fn test_guard_error_display() {
        let err = GuardError::backend("Event", BackendError::Status(503));
        assert_eq!(err.to_string(), "Event failed: GraphQL service answered HTTP 503");
        assert_eq!(err.title(), "Backend unavailable");
    }
}
