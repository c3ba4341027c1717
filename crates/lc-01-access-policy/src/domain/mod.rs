//! Domain layer for the access policy.

pub mod event_actions;
pub mod paths;
pub mod policy;
pub mod report_window;
pub(crate) mod rules;
pub mod visibility;

pub use event_actions::{available_actions, available_club_actions, ClubAction, EventAction};
pub use policy::{
    admits_role, authorize, policy_for, AccessRequest, Action, Decision, PolicyRule, Resource,
    ResourceKind, POLICY_TABLE,
};
pub use report_window::{
    can_edit_report, can_edit_report_at, remaining_edit_millis, REPORT_EDIT_WINDOW_MS,
    REPORT_EDIT_WINDOW_SLO_MS,
};
pub use visibility::{bills_section_visible, report_section, should_fetch_bills, ReportSection};
