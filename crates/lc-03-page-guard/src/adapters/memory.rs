//! In-memory adapter for [`PortalBackend`].
//!
//! Holds fixtures behind a lock and can be told to answer any operation
//! with an error. Every call is recorded so tests can assert what a page
//! fetched.

use crate::error::BackendError;
use crate::ports::outbound::{Operation, PortalBackend, Session};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{
    Club, Event, EventBillsStatus, EventReport, Holiday, Member, StorageFile, UpstreamError,
    UserProfile, Viewer,
};
use std::collections::HashMap;

/// Error an operation is told to return.
#[derive(Debug, Clone)]
enum Failure {
    Upstream(UpstreamError),
    Status(u16),
}

impl Failure {
    fn to_error(&self) -> BackendError {
        match self {
            Failure::Upstream(e) => BackendError::Upstream(e.clone()),
            Failure::Status(code) => BackendError::Status(*code),
        }
    }
}

#[derive(Default)]
struct Store {
    /// Cookie header → signed-in viewer.
    sessions: HashMap<String, Viewer>,
    events: HashMap<String, Event>,
    reports: HashMap<String, EventReport>,
    bills: HashMap<String, EventBillsStatus>,
    /// (event id, filter by location) → clashing ids.
    clashes: HashMap<(String, bool), Vec<String>>,
    clubs: HashMap<String, Club>,
    members: Vec<Member>,
    profiles: HashMap<String, UserProfile>,
    holidays: HashMap<String, Holiday>,
    files: HashMap<String, StorageFile>,
    failures: HashMap<Operation, Failure>,
    calls: Vec<Operation>,
}

/// Fixture-backed [`PortalBackend`].
#[derive(Default)]
pub struct InMemoryBackend {
    store: RwLock<Store>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve requests carrying `cookie` to `viewer`.
    pub fn sign_in(&self, cookie: impl Into<String>, viewer: Viewer) {
        self.store.write().sessions.insert(cookie.into(), viewer);
    }

    pub fn add_event(&self, event: Event) {
        self.store.write().events.insert(event.id.clone(), event);
    }

    pub fn add_report(&self, report: EventReport) {
        self.store
            .write()
            .reports
            .insert(report.eventid.clone(), report);
    }

    pub fn set_bills(&self, event_id: impl Into<String>, bills: EventBillsStatus) {
        self.store.write().bills.insert(event_id.into(), bills);
    }

    pub fn set_clashes(&self, event_id: impl Into<String>, filter_by_location: bool, ids: Vec<String>) {
        self.store
            .write()
            .clashes
            .insert((event_id.into(), filter_by_location), ids);
    }

    pub fn add_club(&self, club: Club) {
        self.store.write().clubs.insert(club.cid.clone(), club);
    }

    pub fn add_member(&self, member: Member) {
        self.store.write().members.push(member);
    }

    pub fn add_profile(&self, profile: UserProfile) {
        self.store
            .write()
            .profiles
            .insert(profile.uid.clone(), profile);
    }

    pub fn add_holiday(&self, holiday: Holiday) {
        self.store
            .write()
            .holidays
            .insert(holiday.id.clone(), holiday);
    }

    pub fn add_file(&self, file: StorageFile) {
        self.store.write().files.insert(file.id.clone(), file);
    }

    /// Answer `operation` with a GraphQL error from now on.
    pub fn fail_with(&self, operation: Operation, error: UpstreamError) {
        self.store
            .write()
            .failures
            .insert(operation, Failure::Upstream(error));
    }

    /// Answer `operation` with a bare HTTP status from now on.
    pub fn fail_status(&self, operation: Operation, status: u16) {
        self.store
            .write()
            .failures
            .insert(operation, Failure::Status(status));
    }

    /// Operations called so far, in order.
    pub fn calls(&self) -> Vec<Operation> {
        self.store.read().calls.clone()
    }

    pub fn was_called(&self, operation: Operation) -> bool {
        self.store.read().calls.contains(&operation)
    }

    /// Record the call, then run `read` unless the operation is set to fail.
    fn answer<T>(
        &self,
        operation: Operation,
        read: impl FnOnce(&Store) -> T,
    ) -> Result<T, BackendError> {
        let mut store = self.store.write();
        store.calls.push(operation);
        if let Some(failure) = store.failures.get(&operation) {
            return Err(failure.to_error());
        }
        Ok(read(&store))
    }
}

#[async_trait]
impl PortalBackend for InMemoryBackend {
    async fn current_viewer(&self, session: &Session) -> Result<Viewer, BackendError> {
        self.answer(Operation::Viewer, |s| {
            session
                .cookie()
                .and_then(|c| s.sessions.get(c))
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn event(&self, _session: &Session, id: &str) -> Result<Option<Event>, BackendError> {
        self.answer(Operation::Event, |s| s.events.get(id).cloned())
    }

    async fn event_report(
        &self,
        _session: &Session,
        event_id: &str,
    ) -> Result<Option<EventReport>, BackendError> {
        self.answer(Operation::EventReport, |s| s.reports.get(event_id).cloned())
    }

    async fn event_bills(
        &self,
        _session: &Session,
        event_id: &str,
    ) -> Result<Option<EventBillsStatus>, BackendError> {
        self.answer(Operation::EventBills, |s| s.bills.get(event_id).cloned())
    }

    async fn clashing_events(
        &self,
        _session: &Session,
        event_id: &str,
        filter_by_location: bool,
    ) -> Result<Vec<String>, BackendError> {
        self.answer(Operation::ClashingEvents, |s| {
            s.clashes
                .get(&(event_id.to_string(), filter_by_location))
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn event_id_by_code(
        &self,
        _session: &Session,
        code: &str,
    ) -> Result<Option<String>, BackendError> {
        self.answer(Operation::EventIdByCode, |s| {
            s.events
                .values()
                .find(|e| e.code.as_deref() == Some(code))
                .map(|e| e.id.clone())
        })
    }

    async fn club(&self, _session: &Session, cid: &str) -> Result<Option<Club>, BackendError> {
        self.answer(Operation::Club, |s| s.clubs.get(cid).cloned())
    }

    async fn member(
        &self,
        _session: &Session,
        cid: &str,
        uid: &str,
    ) -> Result<Option<Member>, BackendError> {
        self.answer(Operation::Member, |s| {
            s.members
                .iter()
                .find(|m| m.cid == cid && m.uid == uid)
                .cloned()
        })
    }

    async fn user_profile(
        &self,
        _session: &Session,
        uid: &str,
    ) -> Result<Option<UserProfile>, BackendError> {
        self.answer(Operation::UserProfile, |s| s.profiles.get(uid).cloned())
    }

    async fn memberships(&self, _session: &Session, uid: &str) -> Result<Vec<Member>, BackendError> {
        self.answer(Operation::Memberships, |s| {
            s.members.iter().filter(|m| m.uid == uid).cloned().collect()
        })
    }

    async fn club_members(
        &self,
        _session: &Session,
        cid: &str,
    ) -> Result<Vec<Member>, BackendError> {
        self.answer(Operation::ClubMembers, |s| {
            s.members.iter().filter(|m| m.cid == cid).cloned().collect()
        })
    }

    async fn holiday(&self, _session: &Session, id: &str) -> Result<Option<Holiday>, BackendError> {
        self.answer(Operation::Holiday, |s| s.holidays.get(id).cloned())
    }

    async fn storage_file(
        &self,
        _session: &Session,
        id: &str,
    ) -> Result<Option<StorageFile>, BackendError> {
        self.answer(Operation::StorageFile, |s| s.files.get(id).cloned())
    }
}
