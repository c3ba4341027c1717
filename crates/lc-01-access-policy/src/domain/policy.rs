//! Declarative policy table keyed by (resource kind, action).
//!
//! Every guarded page asks one question: may this viewer perform this action
//! on this resource right now? The answer comes from [`authorize`], which
//! looks the pair up in [`POLICY_TABLE`], applies the optional role gate and
//! then the rule's check. Pairs without a rule are denied.

use crate::domain::rules;
use crate::error::Denial;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::Serialize;
use shared_types::{
    Club, Event, EventBillsStatus, EventReport, Holiday, Member, Role, StorageFile, UserProfile,
    Viewer,
};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

// =============================================================================
// KEYS
// =============================================================================

/// Kind of resource a page acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Event,
    EventReport,
    EventBills,
    Club,
    Member,
    Holiday,
    StorageFile,
    UserProfile,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Event => "event",
            ResourceKind::EventReport => "event_report",
            ResourceKind::EventBills => "event_bills",
            ResourceKind::Club => "club",
            ResourceKind::Member => "member",
            ResourceKind::Holiday => "holiday",
            ResourceKind::StorageFile => "storage_file",
            ResourceKind::UserProfile => "user_profile",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the page is about to let the viewer do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Manage,
    Create,
    Edit,
    Copy,
    ApproveCc,
    ViewBills,
    Upload,
    Review,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Manage => "manage",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Copy => "copy",
            Action::ApproveCc => "approve_cc",
            Action::ViewBills => "view_bills",
            Action::Upload => "upload",
            Action::Review => "review",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// REQUEST / DECISION
// =============================================================================

/// The fetched resource a rule is evaluated against.
///
/// Every variant carries `Option`s: a missing record is a normal input and
/// the rule turns it into [`Denial::Missing`].
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Event(Option<&'a Event>),
    EventReport {
        event: Option<&'a Event>,
        report: Option<&'a EventReport>,
    },
    EventBills {
        event: Option<&'a Event>,
        bills: Option<&'a EventBillsStatus>,
    },
    Club(Option<&'a Club>),
    Member(Option<&'a Member>),
    Holiday(Option<&'a Holiday>),
    StorageFile(Option<&'a StorageFile>),
    UserProfile {
        target: Option<&'a UserProfile>,
        /// Number of club memberships of the target; `None` when unknown.
        memberships: Option<usize>,
    },
}

impl Resource<'_> {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Event(_) => ResourceKind::Event,
            Resource::EventReport { .. } => ResourceKind::EventReport,
            Resource::EventBills { .. } => ResourceKind::EventBills,
            Resource::Club(_) => ResourceKind::Club,
            Resource::Member(_) => ResourceKind::Member,
            Resource::Holiday(_) => ResourceKind::Holiday,
            Resource::StorageFile(_) => ResourceKind::StorageFile,
            Resource::UserProfile { .. } => ResourceKind::UserProfile,
        }
    }
}

/// Input of one authorization question.
#[derive(Debug, Clone, Copy)]
pub struct AccessRequest<'a> {
    pub viewer: &'a Viewer,
    pub resource: Resource<'a>,
    pub now: DateTime<Utc>,
}

impl<'a> AccessRequest<'a> {
    pub fn new(viewer: &'a Viewer, resource: Resource<'a>, now: DateTime<Utc>) -> Self {
        Self {
            viewer,
            resource,
            now,
        }
    }
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(Denial),
    /// Not allowed here, but the viewer belongs on another page.
    Redirect { target: String, reason: Denial },
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Decision::Allow => "allow",
            Decision::Deny(_) => "deny",
            Decision::Redirect { .. } => "redirect",
        }
    }

    /// Why the viewer was refused or sent elsewhere.
    pub fn reason(&self) -> Option<&Denial> {
        match self {
            Decision::Allow => None,
            Decision::Deny(denial) | Decision::Redirect { reason: denial, .. } => Some(denial),
        }
    }
}

// =============================================================================
// TABLE
// =============================================================================

/// Rule body. Runs only after the role gate passed.
pub type RuleCheck = fn(&AccessRequest<'_>) -> Decision;

/// One row of the policy table.
#[derive(Debug, Clone, Copy)]
pub struct PolicyRule {
    pub resource: ResourceKind,
    pub action: Action,
    /// Roles admitted before the check runs; `None` admits every viewer.
    pub roles: Option<&'static [Role]>,
    pub check: RuleCheck,
    pub description: &'static str,
}

impl PolicyRule {
    const fn new(
        resource: ResourceKind,
        action: Action,
        roles: Option<&'static [Role]>,
        check: RuleCheck,
        description: &'static str,
    ) -> Self {
        Self {
            resource,
            action,
            roles,
            check,
            description,
        }
    }

    /// True when the role gate lets `viewer` through.
    pub fn admits(&self, viewer: &Viewer) -> bool {
        match self.roles {
            Some(roles) => viewer.has_any_role(roles),
            None => true,
        }
    }
}

lazy_static! {
    /// Every guarded (resource, action) pair.
    pub static ref POLICY_TABLE: HashMap<(ResourceKind, Action), PolicyRule> = {
        use ResourceKind as K;

        let table = [
            // --- Events ---
            PolicyRule::new(
                K::Event,
                Action::Manage,
                None,
                rules::event_involves_club,
                "Clubs see only events they own or co-host",
            ),
            PolicyRule::new(
                K::Event,
                Action::Edit,
                None,
                rules::event_owned_by_club,
                "Clubs edit only their own events",
            ),
            PolicyRule::new(
                K::Event,
                Action::Copy,
                None,
                rules::event_involves_club,
                "Clubs copy only events they own or co-host",
            ),
            PolicyRule::new(
                K::Event,
                Action::ApproveCc,
                Some(&[Role::Cc]),
                rules::event_pending_cc,
                "Clubs Council approves events pending its review",
            ),
            PolicyRule::new(
                K::Event,
                Action::ViewBills,
                Some(&[Role::Cc, Role::Slo, Role::Club]),
                rules::event_owned_by_club,
                "Bills are visible to CC, SLO and the owning club",
            ),
            // --- Reports ---
            PolicyRule::new(
                K::EventReport,
                Action::View,
                None,
                rules::report_view,
                "Submitted reports of involved events",
            ),
            PolicyRule::new(
                K::EventReport,
                Action::Create,
                None,
                rules::report_create,
                "Owning club reports on an approved event once",
            ),
            PolicyRule::new(
                K::EventReport,
                Action::Edit,
                None,
                rules::report_edit,
                "Owner, CC or SLO edit within the report window",
            ),
            // --- Bills ---
            PolicyRule::new(
                K::EventBills,
                Action::Upload,
                Some(&[Role::Club]),
                rules::bills_upload,
                "Owning club uploads pending or rejected bills",
            ),
            PolicyRule::new(
                K::EventBills,
                Action::Review,
                None,
                rules::bills_review,
                "Finance officer reviews submitted bills",
            ),
            // --- Directory ---
            PolicyRule::new(
                K::Club,
                Action::Manage,
                None,
                rules::club_exists,
                "Club must exist",
            ),
            PolicyRule::new(
                K::Club,
                Action::Edit,
                None,
                rules::club_exists,
                "Club must exist",
            ),
            PolicyRule::new(
                K::Member,
                Action::Edit,
                None,
                rules::member_exists,
                "Member must exist",
            ),
            PolicyRule::new(
                K::Holiday,
                Action::Edit,
                None,
                rules::holiday_exists,
                "Holiday must exist",
            ),
            PolicyRule::new(
                K::StorageFile,
                Action::Edit,
                Some(&[Role::Cc]),
                rules::storage_file_exists,
                "Clubs Council manages documents",
            ),
            PolicyRule::new(
                K::UserProfile,
                Action::Edit,
                None,
                rules::profile_edit,
                "Users edit their own profile, CC edits any non-CC profile",
            ),
        ];

        table
            .into_iter()
            .map(|r| ((r.resource, r.action), r))
            .collect()
    };
}

/// Rule registered for the pair, if any.
pub fn policy_for(resource: ResourceKind, action: Action) -> Option<&'static PolicyRule> {
    POLICY_TABLE.get(&(resource, action))
}

/// Evaluate only the role gate of a pair.
///
/// Pages use this to refuse before fetching anything. Unregistered pairs
/// admit nobody.
pub fn admits_role(resource: ResourceKind, action: Action, viewer: &Viewer) -> bool {
    policy_for(resource, action).is_some_and(|rule| rule.admits(viewer))
}

/// Answer one authorization question against [`POLICY_TABLE`].
pub fn authorize(action: Action, request: &AccessRequest<'_>) -> Decision {
    let kind = request.resource.kind();

    let decision = match policy_for(kind, action) {
        None => Decision::Deny(Denial::Unregistered {
            resource: kind,
            action,
        }),
        Some(rule) if !rule.admits(request.viewer) => Decision::Deny(Denial::RoleNotAllowed {
            role: request
                .viewer
                .role
                .map(|r| r.as_str().to_string())
                .unwrap_or_else(|| "none".to_string()),
            resource: kind,
            action,
        }),
        Some(rule) => (rule.check)(request),
    };

    debug!(
        resource = %kind,
        action = %action,
        uid = request.viewer.uid.as_deref().unwrap_or("-"),
        decision = decision.label(),
        "Policy evaluated"
    );

    decision
}
