//! # Error Types
//!
//! Errors shared across crates. The GraphQL service reports failures as a
//! list of messages; several pages decide where to route by looking for a
//! known substring in those messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Known substrings the portal routes on.
pub mod markers {
    /// Returned by event queries for an unknown event id.
    pub const EVENT_NOT_FOUND: &str = "Event not found";
    /// Returned by the bills query when no bills record exists yet.
    pub const NO_BILLS_STATUS: &str = "no bills status";
}

/// Error surfaced by the GraphQL service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamError {
    /// Short title shown in a banner.
    pub title: String,
    /// Individual messages from the `errors` array.
    pub messages: Vec<String>,
}

impl UpstreamError {
    pub fn new(title: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            title: title.into(),
            messages,
        }
    }

    /// Single-message GraphQL error.
    pub fn graphql(message: impl Into<String>) -> Self {
        Self::new("GraphQL Error", vec![message.into()])
    }

    /// All messages joined, as one line.
    pub fn message(&self) -> String {
        self.messages.join("; ")
    }

    /// True when any message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }

    pub fn is_event_not_found(&self) -> bool {
        self.mentions(markers::EVENT_NOT_FOUND)
    }

    pub fn is_missing_bills_status(&self) -> bool {
        self.mentions(markers::NO_BILLS_STATUS)
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message())
    }
}

impl std::error::Error for UpstreamError {}
