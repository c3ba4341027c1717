//! Ports for the page guards.

pub mod outbound;

pub use outbound::{Operation, PortalBackend, Session};
