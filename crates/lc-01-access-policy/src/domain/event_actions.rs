//! Actions offered on the event and club management pages.
//!
//! The list depends on the viewer's role, the event's workflow state and
//! whether the event is still upcoming. Order matters: the first action is
//! rendered as the primary button.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{Club, Event, EventState, Role, Viewer};

/// A button on the event management page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Submit,
    Edit,
    Delete,
    Copy,
    Progress,
    RequestReminder,
    Approve,
    LocationClashApproval,
    EditFinances,
}

/// A button on the club management page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClubAction {
    Edit,
    Delete,
    Undelete,
}

/// Actions for `viewer` on `event`.
///
/// `clash` is true when another event holds an overlapping booking of the
/// same location; it only changes what the SLO sees.
pub fn available_actions(
    event: &Event,
    viewer: &Viewer,
    clash: bool,
    now: DateTime<Utc>,
) -> Vec<EventAction> {
    use EventAction::*;

    // Unknown start never counts as upcoming.
    let upcoming = event.start().is_some_and(|start| start >= now);
    let state = event.state();

    if state == EventState::Deleted {
        return if viewer.has_any_role(&[Role::Club, Role::Cc]) {
            vec![Copy]
        } else {
            vec![]
        };
    }

    match viewer.role {
        Some(Role::Club) => {
            if !viewer.is(&event.clubid) {
                vec![Copy]
            } else if state == EventState::Incomplete {
                vec![Submit, Edit, Delete]
            } else if upcoming {
                vec![Edit, Delete, Copy]
            } else {
                vec![Edit, Copy]
            }
        }
        Some(Role::Cc) => match state {
            EventState::PendingCc => vec![Progress, Edit, Delete],
            EventState::PendingRoom => vec![RequestReminder, Edit, Delete],
            EventState::Incomplete => vec![Edit],
            _ => vec![Edit, Delete, Copy],
        },
        Some(Role::Slc) => {
            if state == EventState::PendingBudget && !event.status.budget {
                vec![Approve]
            } else {
                vec![]
            }
        }
        Some(Role::Slo) => {
            let budget_cleared =
                event.status.budget || event.club_category.as_deref() == Some("body");
            if state == EventState::PendingRoom && budget_cleared && !event.status.room {
                if clash {
                    vec![LocationClashApproval, Edit, Delete]
                } else {
                    vec![Approve, Edit, Delete]
                }
            } else if state == EventState::Approved && !upcoming && !event.budget.is_empty() {
                vec![EditFinances, Delete]
            } else {
                vec![Edit, Delete]
            }
        }
        _ => vec![],
    }
}

/// Actions for `viewer` on `club`.
pub fn available_club_actions(club: &Club, viewer: &Viewer) -> Vec<ClubAction> {
    if club.state.as_deref() == Some("deleted") {
        return vec![ClubAction::Undelete];
    }
    match viewer.role {
        Some(Role::Club) => vec![ClubAction::Edit],
        Some(Role::Cc) => vec![ClubAction::Edit, ClubAction::Delete],
        _ => vec![],
    }
}
