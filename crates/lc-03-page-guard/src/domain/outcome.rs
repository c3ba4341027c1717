//! What a guarded page resolves to.

use lc_01_access_policy::Decision;
use serde::Serialize;

/// Message shown in place of a page the viewer cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
    /// Where the notice's back button leads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            back: None,
        }
    }

    pub fn with_back(mut self, target: impl Into<String>) -> Self {
        self.back = Some(target.into());
        self
    }
}

/// Result of running a page guard.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome<V> {
    /// Render the page with this view model.
    Render(V),
    Redirect(String),
    /// Missing or forbidden; both land on the same page.
    NotFound,
    Notice(Notice),
}

impl<V> GuardOutcome<V> {
    /// Outcome for a page that will not render: the decision's redirect
    /// target, or not-found.
    pub fn denied(decision: Decision) -> Self {
        match decision {
            Decision::Redirect { target, .. } => GuardOutcome::Redirect(target),
            Decision::Allow | Decision::Deny(_) => GuardOutcome::NotFound,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GuardOutcome::Render(_) => "render",
            GuardOutcome::Redirect(_) => "redirect",
            GuardOutcome::NotFound => "not_found",
            GuardOutcome::Notice(_) => "notice",
        }
    }

    pub fn is_render(&self) -> bool {
        matches!(self, GuardOutcome::Render(_))
    }

    /// The view model, if the page renders.
    pub fn view(&self) -> Option<&V> {
        match self {
            GuardOutcome::Render(view) => Some(view),
            _ => None,
        }
    }

    pub fn map<W>(self, f: impl FnOnce(V) -> W) -> GuardOutcome<W> {
        match self {
            GuardOutcome::Render(view) => GuardOutcome::Render(f(view)),
            GuardOutcome::Redirect(target) => GuardOutcome::Redirect(target),
            GuardOutcome::NotFound => GuardOutcome::NotFound,
            GuardOutcome::Notice(notice) => GuardOutcome::Notice(notice),
        }
    }
}
