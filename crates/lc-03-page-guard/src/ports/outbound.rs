//! # Outbound Ports
//!
//! Everything a guarded page reads comes through [`PortalBackend`]. Each call
//! carries the request's [`Session`] so the service can resolve the caller.

use crate::error::BackendError;
use async_trait::async_trait;
use shared_types::{
    Club, Event, EventBillsStatus, EventReport, Holiday, Member, StorageFile, UserProfile, Viewer,
};
use std::fmt;

/// Credentials of the incoming request, forwarded verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    cookie: Option<String>,
}

impl Session {
    pub fn new(cookie: Option<String>) -> Self {
        Self {
            cookie: cookie.filter(|c| !c.is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Raw `Cookie` header of the request.
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }
}

/// Backend queries, named after their GraphQL operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Viewer,
    Event,
    EventReport,
    EventBills,
    ClashingEvents,
    EventIdByCode,
    Club,
    Member,
    UserProfile,
    Memberships,
    ClubMembers,
    Holiday,
    StorageFile,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Viewer => "GetUser",
            Operation::Event => "Event",
            Operation::EventReport => "EventReport",
            Operation::EventBills => "EventBillsStatus",
            Operation::ClashingEvents => "ClashingEvents",
            Operation::EventIdByCode => "EventId",
            Operation::Club => "Club",
            Operation::Member => "Member",
            Operation::UserProfile => "GetUserProfile",
            Operation::Memberships => "MemberRoles",
            Operation::ClubMembers => "Members",
            Operation::Holiday => "GetHoliday",
            Operation::StorageFile => "GetFile",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the portal's GraphQL service.
///
/// `Ok(None)` and empty lists mean the service answered without the record.
/// An `errors` answer is [`BackendError::Upstream`].
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// The account behind the session. No session yields the anonymous viewer.
    async fn current_viewer(&self, session: &Session) -> Result<Viewer, BackendError>;

    async fn event(&self, session: &Session, id: &str) -> Result<Option<Event>, BackendError>;

    async fn event_report(
        &self,
        session: &Session,
        event_id: &str,
    ) -> Result<Option<EventReport>, BackendError>;

    async fn event_bills(
        &self,
        session: &Session,
        event_id: &str,
    ) -> Result<Option<EventBillsStatus>, BackendError>;

    /// Ids of events overlapping `event_id` in time, optionally only those
    /// sharing a location.
    async fn clashing_events(
        &self,
        session: &Session,
        event_id: &str,
        filter_by_location: bool,
    ) -> Result<Vec<String>, BackendError>;

    async fn event_id_by_code(
        &self,
        session: &Session,
        code: &str,
    ) -> Result<Option<String>, BackendError>;

    async fn club(&self, session: &Session, cid: &str) -> Result<Option<Club>, BackendError>;

    async fn member(
        &self,
        session: &Session,
        cid: &str,
        uid: &str,
    ) -> Result<Option<Member>, BackendError>;

    async fn user_profile(
        &self,
        session: &Session,
        uid: &str,
    ) -> Result<Option<UserProfile>, BackendError>;

    /// Club memberships held by `uid`.
    async fn memberships(&self, session: &Session, uid: &str) -> Result<Vec<Member>, BackendError>;

    /// All members of club `cid`.
    async fn club_members(&self, session: &Session, cid: &str)
        -> Result<Vec<Member>, BackendError>;

    async fn holiday(&self, session: &Session, id: &str) -> Result<Option<Holiday>, BackendError>;

    async fn storage_file(
        &self,
        session: &Session,
        id: &str,
    ) -> Result<Option<StorageFile>, BackendError>;
}
