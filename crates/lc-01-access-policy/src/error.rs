//! Denial reasons produced by the policy table.
//!
//! A denial is logged and counted but never shown to the viewer: every
//! denial lands on the same not-found page.

use crate::domain::policy::{Action, ResourceKind};
use thiserror::Error;

/// Why a rule refused access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    /// The target resource does not exist.
    #[error("{0} not found")]
    Missing(&'static str),

    /// The viewer's role is not admitted by the rule.
    #[error("role {role} may not {action} {resource}")]
    RoleNotAllowed {
        role: String,
        resource: ResourceKind,
        action: Action,
    },

    /// The resource is in the wrong workflow state.
    #[error("{resource} is {actual}, expected {expected}")]
    WrongState {
        resource: ResourceKind,
        expected: &'static str,
        actual: String,
    },

    /// The viewer neither owns nor co-hosts the resource.
    #[error("viewer does not own {0}")]
    NotOwner(ResourceKind),

    /// The report edit window has closed.
    #[error("report edit window closed")]
    WindowClosed,

    /// Creation refused because the resource exists already.
    #[error("{0} already exists")]
    AlreadyExists(ResourceKind),

    /// No rule registered for the pair.
    #[error("no policy for {action} on {resource}")]
    Unregistered {
        resource: ResourceKind,
        action: Action,
    },
}

impl Denial {
    /// Short label for metrics and structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::Missing(_) => "missing",
            Denial::RoleNotAllowed { .. } => "role",
            Denial::WrongState { .. } => "state",
            Denial::NotOwner(_) => "owner",
            Denial::WindowClosed => "window",
            Denial::AlreadyExists(_) => "exists",
            Denial::Unregistered { .. } => "unregistered",
        }
    }
}
