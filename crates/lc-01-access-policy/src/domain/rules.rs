//! Rule bodies referenced by the policy table.
//!
//! Each rule receives a request whose role gate already passed. Checks run in
//! the order the page flow requires: existence, ownership, workflow state,
//! then anything time-dependent.

use crate::domain::paths;
use crate::domain::policy::{AccessRequest, Decision, Resource, ResourceKind};
use crate::domain::report_window::can_edit_report_at;
use crate::error::Denial;
use shared_types::{BillsState, Event, EventState, Role, Viewer};

fn deny(denial: Denial) -> Decision {
    Decision::Deny(denial)
}

fn missing(what: &'static str) -> Decision {
    deny(Denial::Missing(what))
}

fn wrong_state(resource: ResourceKind, expected: &'static str, actual: impl ToString) -> Decision {
    deny(Denial::WrongState {
        resource,
        expected,
        actual: actual.to_string(),
    })
}

/// A club account acting on an event it does not own or co-host.
fn club_outsider(viewer: &Viewer, event: &Event) -> bool {
    viewer.has_role(Role::Club) && !event.involves(viewer)
}

// =============================================================================
// EVENTS
// =============================================================================

pub(crate) fn event_involves_club(req: &AccessRequest<'_>) -> Decision {
    let Resource::Event(Some(event)) = req.resource else {
        return missing("event");
    };
    if club_outsider(req.viewer, event) {
        return deny(Denial::NotOwner(ResourceKind::Event));
    }
    Decision::Allow
}

pub(crate) fn event_owned_by_club(req: &AccessRequest<'_>) -> Decision {
    let Resource::Event(Some(event)) = req.resource else {
        return missing("event");
    };
    if req.viewer.has_role(Role::Club) && !req.viewer.is(&event.clubid) {
        return deny(Denial::NotOwner(ResourceKind::Event));
    }
    Decision::Allow
}

pub(crate) fn event_pending_cc(req: &AccessRequest<'_>) -> Decision {
    let Resource::Event(Some(event)) = req.resource else {
        return missing("event");
    };
    if event.state() != EventState::PendingCc {
        return wrong_state(ResourceKind::Event, "pending_cc", event.state());
    }
    Decision::Allow
}

// =============================================================================
// REPORTS
// =============================================================================

pub(crate) fn report_view(req: &AccessRequest<'_>) -> Decision {
    let Resource::EventReport { event, report } = req.resource else {
        return missing("event");
    };
    let Some(event) = event else {
        return missing("event");
    };
    if club_outsider(req.viewer, event) {
        return deny(Denial::NotOwner(ResourceKind::EventReport));
    }
    if !event.event_report_submitted || report.is_none() {
        return missing("event report");
    }
    Decision::Allow
}

pub(crate) fn report_create(req: &AccessRequest<'_>) -> Decision {
    let Resource::EventReport {
        event: Some(event), ..
    } = req.resource
    else {
        return missing("event");
    };
    if !req.viewer.is(&event.clubid) {
        return deny(Denial::NotOwner(ResourceKind::EventReport));
    }
    if event.state() != EventState::Approved {
        return wrong_state(ResourceKind::Event, "approved", event.state());
    }
    if event.event_report_submitted {
        return Decision::Redirect {
            target: paths::report_edit(&event.id),
            reason: Denial::AlreadyExists(ResourceKind::EventReport),
        };
    }
    Decision::Allow
}

pub(crate) fn report_edit(req: &AccessRequest<'_>) -> Decision {
    let Resource::EventReport { event, report } = req.resource else {
        return missing("event");
    };
    let Some(event) = event else {
        return missing("event");
    };
    let viewer = req.viewer;
    if !viewer.is(&event.clubid) && !viewer.has_any_role(&[Role::Cc, Role::Slo]) {
        return deny(Denial::NotOwner(ResourceKind::EventReport));
    }
    if event.state() != EventState::Approved {
        return wrong_state(ResourceKind::Event, "approved", event.state());
    }
    if !event.event_report_submitted || report.is_none() {
        return Decision::Redirect {
            target: paths::report_new(&event.id),
            reason: Denial::Missing("report"),
        };
    }
    if !can_edit_report_at(event, report, viewer, req.now) {
        return deny(Denial::WindowClosed);
    }
    Decision::Allow
}

// =============================================================================
// BILLS
// =============================================================================

pub(crate) fn bills_upload(req: &AccessRequest<'_>) -> Decision {
    let Resource::EventBills { event, bills } = req.resource else {
        return missing("event");
    };
    let Some(event) = event else {
        return missing("event");
    };
    let state = bills.and_then(|b| b.state);
    if !matches!(state, Some(BillsState::Rejected | BillsState::NotSubmitted)) {
        let actual = state.map(|s| s.as_str()).unwrap_or("none");
        return wrong_state(ResourceKind::EventBills, "rejected or not_submitted", actual);
    }
    if !req.viewer.is(&event.clubid) {
        return deny(Denial::NotOwner(ResourceKind::EventBills));
    }
    if event.state() != EventState::Approved {
        return wrong_state(ResourceKind::Event, "approved", event.state());
    }
    Decision::Allow
}

pub(crate) fn bills_review(req: &AccessRequest<'_>) -> Decision {
    let Resource::EventBills { event, bills } = req.resource else {
        return missing("event");
    };
    if event.is_none() {
        return missing("event");
    }
    match bills.and_then(|b| b.state) {
        Some(state @ (BillsState::NotSubmitted | BillsState::Rejected)) => {
            wrong_state(ResourceKind::EventBills, "submitted or accepted", state)
        }
        _ => Decision::Allow,
    }
}

// =============================================================================
// DIRECTORY
// =============================================================================

pub(crate) fn club_exists(req: &AccessRequest<'_>) -> Decision {
    match req.resource {
        Resource::Club(Some(_)) => Decision::Allow,
        _ => missing("club"),
    }
}

pub(crate) fn member_exists(req: &AccessRequest<'_>) -> Decision {
    match req.resource {
        Resource::Member(Some(_)) => Decision::Allow,
        _ => missing("member"),
    }
}

pub(crate) fn holiday_exists(req: &AccessRequest<'_>) -> Decision {
    match req.resource {
        Resource::Holiday(Some(_)) => Decision::Allow,
        _ => missing("holiday"),
    }
}

pub(crate) fn storage_file_exists(req: &AccessRequest<'_>) -> Decision {
    match req.resource {
        Resource::StorageFile(Some(_)) => Decision::Allow,
        _ => missing("document"),
    }
}

pub(crate) fn profile_edit(req: &AccessRequest<'_>) -> Decision {
    let Resource::UserProfile {
        target: Some(target),
        memberships,
    } = req.resource
    else {
        return missing("user");
    };
    let viewer = req.viewer;
    if !viewer.is(&target.uid) && !viewer.has_role(Role::Cc) {
        return deny(Denial::NotOwner(ResourceKind::UserProfile));
    }
    if target.role == Some(Role::Cc) {
        return deny(Denial::RoleNotAllowed {
            role: Role::Cc.to_string(),
            resource: ResourceKind::UserProfile,
            action: crate::domain::policy::Action::Edit,
        });
    }
    // Accounts without a single membership (club accounts included) have no
    // editable profile.
    if memberships == Some(0) {
        return missing("memberships");
    }
    Decision::Allow
}
