//! # Core Domain Entities
//!
//! Defines the entities the portal reads from the GraphQL service.
//!
//! ## Clusters
//!
//! - **Identity**: `Role`, `Viewer`, `UserProfile`, `Membership`
//! - **Events**: `Event`, `EventStatus`, `EventState`, `BudgetRow`
//! - **Post-event**: `EventReport`, `EventBillsStatus`, `BillsState`
//! - **Directory**: `Club`, `Member`, `Holiday`, `StorageFile`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Role attached to an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Any logged-in student or staff member.
    Public,
    /// A club account (the uid is the club id).
    Club,
    /// Clubs Council.
    Cc,
    /// Student Life Council.
    Slc,
    /// Student Life Office.
    Slo,
    /// Any role string this build does not know about. Never admitted.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// All roles a rule can name.
    pub const KNOWN: [Role; 5] = [Role::Public, Role::Club, Role::Cc, Role::Slc, Role::Slo];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Public => "public",
            Role::Club => "club",
            Role::Cc => "cc",
            Role::Slc => "slc",
            Role::Slo => "slo",
            Role::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    /// Unknown strings map to [`Role::Unknown`] instead of failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "public" => Role::Public,
            "club" => Role::Club,
            "cc" => Role::Cc,
            "slc" => Role::Slc,
            "slo" => Role::Slo,
            _ => Role::Unknown,
        })
    }
}

/// The user acting on the current request.
///
/// A request without a session yields the anonymous viewer with both fields
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub uid: Option<String>,
    pub role: Option<Role>,
}

impl Viewer {
    pub fn new(uid: impl Into<String>, role: Role) -> Self {
        Self {
            uid: Some(uid.into()),
            role: Some(role),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.uid.is_none()
    }

    /// True when the viewer holds exactly `role`.
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    /// True when the viewer holds any of `roles`.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.role.is_some_and(|r| roles.contains(&r))
    }

    /// True when the viewer's uid equals `id`. An anonymous viewer matches nothing.
    pub fn is(&self, id: &str) -> bool {
        self.uid.as_deref() == Some(id)
    }
}

/// Profile of a user looked up by uid (target of profile pages, report submitters).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
}

/// One membership role held by a user in a club.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    #[serde(default)]
    pub cid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub rejected: bool,
    #[serde(default)]
    pub deleted: bool,
}

// =============================================================================
// CLUSTER B: EVENTS
// =============================================================================

/// Position of an event in the approval pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventState {
    Incomplete,
    PendingCc,
    PendingBudget,
    PendingRoom,
    Approved,
    Completed,
    Ongoing,
    Deleted,
}

impl EventState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventState::Incomplete => "incomplete",
            EventState::PendingCc => "pending_cc",
            EventState::PendingBudget => "pending_budget",
            EventState::PendingRoom => "pending_room",
            EventState::Approved => "approved",
            EventState::Completed => "completed",
            EventState::Ongoing => "ongoing",
            EventState::Deleted => "deleted",
        }
    }

    /// Human-readable label shown next to the event.
    pub fn label(&self) -> &'static str {
        match self {
            EventState::Incomplete => "Incomplete",
            EventState::PendingCc => "Pending Clubs Council Approval",
            EventState::PendingBudget => "Pending SLC Approval",
            EventState::PendingRoom => "Pending SLO Approval",
            EventState::Approved => "Approved",
            EventState::Completed => "Completed",
            EventState::Ongoing => "Ongoing",
            EventState::Deleted => "Deleted",
        }
    }
}

impl fmt::Display for EventState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow status nested in every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStatus {
    pub state: EventState,
    /// Venue approved by the SLO.
    #[serde(default)]
    pub room: bool,
    /// Budget approved by the SLC.
    #[serde(default)]
    pub budget: bool,
    #[serde(default)]
    pub last_updated_time: Option<String>,
    #[serde(default)]
    pub last_updated_by: Option<String>,
    #[serde(default)]
    pub submission_time: Option<String>,
    #[serde(default)]
    pub cc_approver: Option<String>,
    #[serde(default)]
    pub slc_approver: Option<String>,
    #[serde(default)]
    pub deleted_by: Option<String>,
}

impl EventStatus {
    pub fn new(state: EventState) -> Self {
        Self {
            state,
            room: false,
            budget: false,
            last_updated_time: None,
            last_updated_by: None,
            submission_time: None,
            cc_approver: None,
            slc_approver: None,
            deleted_by: None,
        }
    }
}

/// One line of an event budget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRow {
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub advance: bool,
    #[serde(default)]
    pub billno: Option<String>,
    #[serde(default)]
    pub amount_used: Option<f64>,
}

/// An event as returned by the GraphQL service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Owning club.
    pub clubid: String,
    /// Collaborating clubs, treated as co-owners on some pages.
    #[serde(default)]
    pub collabclubs: Vec<String>,
    /// Category of the owning body (`club`, `body`, ...).
    #[serde(default)]
    pub club_category: Option<String>,
    /// Point of contact (uid).
    #[serde(default)]
    pub poc: Option<String>,
    pub status: EventStatus,
    #[serde(default, with = "crate::time::period")]
    pub datetimeperiod: Option<(DateTime<Utc>, DateTime<Utc>)>,
    #[serde(default)]
    pub budget: Vec<BudgetRow>,
    #[serde(default)]
    pub location: Vec<String>,
    #[serde(default)]
    pub event_report_submitted: bool,
}

impl Event {
    /// Minimal event, mostly useful for tests and fixtures.
    pub fn new(id: impl Into<String>, clubid: impl Into<String>, state: EventState) -> Self {
        Self {
            id: id.into(),
            code: None,
            name: String::new(),
            clubid: clubid.into(),
            collabclubs: Vec::new(),
            club_category: None,
            poc: None,
            status: EventStatus::new(state),
            datetimeperiod: None,
            budget: Vec::new(),
            location: Vec::new(),
            event_report_submitted: false,
        }
    }

    pub fn state(&self) -> EventState {
        self.status.state
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.datetimeperiod.map(|(start, _)| start)
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.datetimeperiod.map(|(_, end)| end)
    }

    /// True when `uid` is the owning club.
    pub fn is_owned_by(&self, uid: &str) -> bool {
        self.clubid == uid
    }

    /// True when `uid` is listed as a collaborating club.
    pub fn has_collaborator(&self, uid: &str) -> bool {
        self.collabclubs.iter().any(|c| c == uid)
    }

    /// True when the viewer's club owns or co-hosts the event.
    pub fn involves(&self, viewer: &Viewer) -> bool {
        match viewer.uid.as_deref() {
            Some(uid) => self.is_owned_by(uid) || self.has_collaborator(uid),
            None => false,
        }
    }
}

// =============================================================================
// CLUSTER C: POST-EVENT
// =============================================================================

/// Report submitted after an approved event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventReport {
    pub eventid: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub attendance: Option<u32>,
    #[serde(default)]
    pub external_attendance: Option<u32>,
    #[serde(default)]
    pub prizes: Vec<String>,
    #[serde(default)]
    pub prizes_breakdown: Option<String>,
    #[serde(default)]
    pub winners: Option<String>,
    #[serde(default)]
    pub photos_link: Option<String>,
    #[serde(default)]
    pub feedback_cc: Option<String>,
    #[serde(default)]
    pub feedback_college: Option<String>,
    #[serde(default)]
    pub submitted_by: Option<String>,
    /// Raw ISO-8601 submission instant. Kept unparsed so a malformed value
    /// denies edits instead of failing the fetch.
    #[serde(default)]
    pub submitted_time: Option<String>,
}

impl EventReport {
    pub fn submitted(eventid: impl Into<String>, submitted_time: impl Into<String>) -> Self {
        Self {
            eventid: eventid.into(),
            submitted_time: Some(submitted_time.into()),
            ..Self::default()
        }
    }
}

/// Lifecycle of the bills an organizing club uploads after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillsState {
    NotSubmitted,
    Rejected,
    Submitted,
    Accepted,
}

impl BillsState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillsState::NotSubmitted => "not_submitted",
            BillsState::Rejected => "rejected",
            BillsState::Submitted => "submitted",
            BillsState::Accepted => "accepted",
        }
    }
}

impl fmt::Display for BillsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bills status of one event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBillsStatus {
    #[serde(default)]
    pub state: Option<BillsState>,
    #[serde(default)]
    pub slo_comment: Option<String>,
    #[serde(default)]
    pub updated_time: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub submitted_time: Option<String>,
}

impl EventBillsStatus {
    pub fn with_state(state: BillsState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }
}

// =============================================================================
// CLUSTER D: DIRECTORY
// =============================================================================

/// A club or student body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub cid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// One position held by a member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRole {
    #[serde(default)]
    pub rid: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub rejected: bool,
    #[serde(default)]
    pub deleted: bool,
}

/// A user's membership record in a club.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub uid: String,
    pub cid: String,
    #[serde(default)]
    pub poc: bool,
    #[serde(default)]
    pub roles: Vec<MemberRole>,
}

/// A calendar holiday.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A document managed through the file-storage service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageFile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Opaque filename understood by the file-storage service.
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub filetype: Option<String>,
    #[serde(default)]
    pub latest_version: Option<u32>,
    #[serde(default)]
    pub modified_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        let role: Role = serde_json::from_str("\"slo\"").unwrap();
        assert_eq!(role, Role::Slo);
        assert_eq!(serde_json::to_string(&Role::Cc).unwrap(), "\"cc\"");
    }

    #[test]
    fn test_unknown_role_does_not_fail() {
        let role: Role = serde_json::from_str("\"warden\"").unwrap();
        assert_eq!(role, Role::Unknown);
        assert_eq!("warden".parse::<Role>().unwrap(), Role::Unknown);
    }

    #[test]
    fn test_viewer_matching() {
        let viewer = Viewer::new("drama.club", Role::Club);
        assert!(viewer.is("drama.club"));
        assert!(!viewer.is("music.club"));
        assert!(viewer.has_any_role(&[Role::Cc, Role::Club]));

        let anon = Viewer::anonymous();
        assert!(anon.is_anonymous());
        assert!(!anon.has_any_role(&Role::KNOWN));
        assert!(!anon.is(""));
    }

    #[test]
    fn test_event_from_graphql_shape() {
        let json = r#"{
            "_id": "ev1",
            "code": "EV24001",
            "name": "Open Mic",
            "clubid": "drama.club",
            "collabclubs": ["music.club"],
            "clubCategory": "club",
            "status": {"state": "pending_room", "room": false, "budget": true},
            "datetimeperiod": ["2024-03-01T18:00:00.000Z", "2024-03-01T21:00:00.000Z"],
            "budget": [{"amount": 1500.0, "description": "snacks", "advance": false}],
            "eventReportSubmitted": false
        }"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.id, "ev1");
        assert_eq!(event.state(), EventState::PendingRoom);
        assert!(event.status.budget);
        assert!(event.start().unwrap() < event.end().unwrap());
        assert!(event.involves(&Viewer::new("music.club", Role::Club)));
        assert!(!event.involves(&Viewer::new("art.club", Role::Club)));
        assert!(!event.involves(&Viewer::anonymous()));
    }

    #[test]
    fn test_report_keeps_raw_time() {
        let json = r#"{"eventid": "ev1", "submittedTime": "not-a-date", "submittedBy": "a.b"}"#;
        let report: EventReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.submitted_time.as_deref(), Some("not-a-date"));
    }

    #[test]
    fn test_bills_state_wire_names() {
        let bills: EventBillsStatus =
            serde_json::from_str(r#"{"state": "not_submitted", "sloComment": null}"#).unwrap();
        assert_eq!(bills.state, Some(BillsState::NotSubmitted));
    }
}
