//! View models returned by guarded pages.
//!
//! Field names follow the GraphQL schema's camelCase so the same records
//! can be handed to the client untouched.

use chrono::{DateTime, Utc};
use lc_01_access_policy::{ClubAction, EventAction, ReportSection};
use serde::Serialize;
use shared_types::{
    BudgetRow, Club, Event, EventBillsStatus, EventReport, Holiday, Member, StorageFile,
    UserProfile,
};

// =============================================================================
// EVENTS
// =============================================================================

/// `/manage/events/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPage {
    pub event: Event,
    pub poc: UserProfile,
    pub actions: Vec<EventAction>,
    /// Another event holds an overlapping booking of the same location.
    pub clash: bool,
    pub report: Option<ReportSection>,
    pub show_bills: bool,
    pub bills: Option<EventBillsStatus>,
}

/// `/manage/events/{id}/edit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFormPage {
    pub event: Event,
}

/// Event fields carried over to a copy.
///
/// Identity, code, budget, venue and workflow status start fresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    pub clubid: String,
    pub collabclubs: Vec<String>,
    pub club_category: Option<String>,
    pub poc: Option<String>,
    pub datetimeperiod: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            clubid: event.clubid.clone(),
            collabclubs: event.collabclubs.clone(),
            club_category: event.club_category.clone(),
            poc: event.poc.clone(),
            datetimeperiod: event.datetimeperiod,
        }
    }
}

/// `/manage/events/{id}/copy`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventCopyPage {
    pub draft: EventDraft,
}

/// `/manage/events/{id}/approve_cc`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveCcPage {
    pub eventid: String,
    pub code: Option<String>,
    pub name: String,
    /// Any other event overlaps in time, wherever it is held.
    pub clash: bool,
    /// Council members who may sign off the approval.
    pub approvers: Vec<Member>,
}

// =============================================================================
// REPORTS
// =============================================================================

/// `/manage/events/{id}/report`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    pub event: Event,
    pub report: EventReport,
    pub submitter: UserProfile,
}

/// `/manage/events/{id}/report/new` and `/report/edit`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFormPage {
    pub event: Event,
    /// Existing report when editing.
    pub report: Option<EventReport>,
    /// Time left in the edit window.
    pub remaining_millis: Option<i64>,
}

// =============================================================================
// BILLS
// =============================================================================

/// One budget line as shown on the bills pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRow {
    pub amount: f64,
    pub description: Option<String>,
    pub advance: bool,
    pub billno: Option<String>,
    /// Defaults to the budgeted amount until the club reports otherwise.
    pub amount_used: f64,
}

impl From<&BudgetRow> for BillRow {
    fn from(row: &BudgetRow) -> Self {
        Self {
            amount: row.amount,
            description: row.description.clone(),
            advance: row.advance,
            billno: row.billno.clone(),
            amount_used: row.amount_used.unwrap_or(row.amount),
        }
    }
}

pub fn bill_rows(event: &Event) -> Vec<BillRow> {
    event.budget.iter().map(BillRow::from).collect()
}

/// `/manage/events/{id}/bills`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillsUploadPage {
    pub eventid: String,
    pub code: Option<String>,
    pub rows: Vec<BillRow>,
    pub bills: EventBillsStatus,
}

/// `/manage/finances/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancePage {
    pub event: Event,
    pub bills: EventBillsStatus,
    pub rows: Vec<BillRow>,
    /// Bills await the officer's decision.
    pub can_decide: bool,
}

// =============================================================================
// DIRECTORY
// =============================================================================

/// `/manage/clubs/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubPage {
    pub club: Club,
    pub actions: Vec<ClubAction>,
}

/// `/manage/clubs/{id}/edit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubFormPage {
    pub club: Club,
}

/// `/manage/members/{cid}:{uid}/edit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberFormPage {
    pub member: Member,
    pub profile: UserProfile,
}

/// `/manage/holidays/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HolidayFormPage {
    pub holiday: Holiday,
}

/// `/docs/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocFormPage {
    pub file: StorageFile,
}

/// `/profile/{id}/edit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileFormPage {
    pub profile: UserProfile,
    pub memberships: Vec<Member>,
}
