//! Post-event sections of the event management page.
//!
//! Both sections appear only once an approved event has ended, and only for
//! the roles that deal with post-event paperwork.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared_types::{Event, EventBillsStatus, EventState, Role, Viewer};

const POST_EVENT_ROLES: [Role; 3] = [Role::Cc, Role::Club, Role::Slo];

/// What the report section shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub submitted: bool,
    /// Owning club may add the missing report.
    pub can_add: bool,
}

/// True once an approved event has ended. An event without a known end is
/// treated as ended.
fn approved_and_over(event: &Event, now: DateTime<Utc>) -> bool {
    event.state() == EventState::Approved && !event.end().is_some_and(|end| end > now)
}

/// Whether the page should ask for the event's bills status at all.
///
/// Stricter than the section check: the end must be known and in the past.
pub fn should_fetch_bills(event: &Event, now: DateTime<Utc>) -> bool {
    event.state() == EventState::Approved
        && event.end().is_some_and(|end| end < now)
        && !event.budget.is_empty()
}

pub fn report_section(event: &Event, viewer: &Viewer, now: DateTime<Utc>) -> Option<ReportSection> {
    if !viewer.has_any_role(&POST_EVENT_ROLES) || !approved_and_over(event, now) {
        return None;
    }
    let submitted = event.event_report_submitted;
    Some(ReportSection {
        submitted,
        can_add: !submitted && viewer.is(&event.clubid),
    })
}

pub fn bills_section_visible(
    event: &Event,
    bills: Option<&EventBillsStatus>,
    viewer: &Viewer,
    now: DateTime<Utc>,
) -> bool {
    viewer.has_any_role(&POST_EVENT_ROLES)
        && approved_and_over(event, now)
        && !event.budget.is_empty()
        && bills.is_some()
}
