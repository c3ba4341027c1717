//! Page Guard Service
//!
//! One method per guarded page. Each method runs the same pipeline:
//!
//! ```text
//! viewer ──┐
//!          ├──→ authorize(action, resource) ──→ Render | Redirect | NotFound | Notice
//! record ──┘
//! ```
//!
//! GraphQL errors are read as "record absent" except where a page routes on
//! a specific message. Transport and decode failures abort the page with a
//! [`GuardError`].

use crate::domain::{
    bill_rows, current_approvers, resolve_club_id, split_member_key, ApproveCcPage,
    BillsUploadPage, ClubFormPage, ClubPage, DocFormPage, EventCopyPage, EventDraft,
    EventFormPage, EventPage, FinancePage, GuardOutcome, HolidayFormPage, MemberFormPage, Notice,
    ProfileFormPage, ReportFormPage, ReportPage, COUNCIL_CLUB_ID,
};
use crate::error::{BackendError, GuardError};
use crate::ports::outbound::{Operation, PortalBackend, Session};
use chrono::{DateTime, Utc};
use lc_01_access_policy::{
    admits_role, authorize, available_actions, available_club_actions, bills_section_visible,
    paths, remaining_edit_millis, report_section, should_fetch_bills, AccessRequest, Action,
    Clock, Decision, Resource, ResourceKind, SystemClock,
};
use life_telemetry::{log_decision, record_decision, GUARD_OUTCOMES};
use shared_types::{BillsState, EventBillsStatus, Role, UpstreamError, Viewer};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Shown instead of the bills upload form.
pub const BILLS_UPLOAD_REFUSED: &str = "You are not allowed to upload bills for this event.";

/// Page labels used in logs and metrics.
pub mod pages {
    pub const EVENT: &str = "event";
    pub const EVENT_EDIT: &str = "event_edit";
    pub const EVENT_COPY: &str = "event_copy";
    pub const EVENT_CODE: &str = "event_code";
    pub const APPROVE_CC: &str = "approve_cc";
    pub const REPORT: &str = "report";
    pub const REPORT_NEW: &str = "report_new";
    pub const REPORT_EDIT: &str = "report_edit";
    pub const BILLS: &str = "bills";
    pub const FINANCE: &str = "finance";
    pub const CLUB: &str = "club";
    pub const CLUB_EDIT: &str = "club_edit";
    pub const MEMBER_EDIT: &str = "member_edit";
    pub const HOLIDAY: &str = "holiday";
    pub const DOC: &str = "doc";
    pub const PROFILE: &str = "profile";
    pub const PROFILE_EDIT: &str = "profile_edit";
}

pub type PageResult<V> = Result<GuardOutcome<V>, GuardError>;

/// Read a backend answer, treating a GraphQL error as an absent record.
fn tolerate<T: Default>(
    operation: Operation,
    result: Result<T, BackendError>,
) -> Result<T, GuardError> {
    match result {
        Ok(value) => Ok(value),
        Err(BackendError::Upstream(e)) => {
            debug!(operation = %operation, error = %e, "GraphQL error read as absent record");
            Ok(T::default())
        }
        Err(e) => Err(GuardError::backend(operation.as_str(), e)),
    }
}

/// Like [`tolerate`], except that "Event not found" ends the page.
fn unless_event_missing<T: Default>(
    operation: Operation,
    result: Result<T, BackendError>,
) -> Result<Option<T>, GuardError> {
    match result {
        Err(BackendError::Upstream(e)) if e.is_event_not_found() => Ok(None),
        other => tolerate(operation, other).map(Some),
    }
}

fn finance_notice<V>(error: &UpstreamError) -> GuardOutcome<V> {
    GuardOutcome::Notice(
        Notice::new(format!("Error: {}", error.message())).with_back(paths::FINANCES),
    )
}

/// Count the outcome of one page run.
fn finish<V>(page: &'static str, result: PageResult<V>) -> PageResult<V> {
    let label = match &result {
        Ok(outcome) => outcome.label(),
        Err(_) => "error",
    };
    GUARD_OUTCOMES.with_label_values(&[page, label]).inc();
    result
}

/// Guards every page that needs more than the route ACL.
pub struct PageGuard {
    backend: Arc<dyn PortalBackend>,
    clock: Arc<dyn Clock>,
}

impl PageGuard {
    pub fn new(backend: Arc<dyn PortalBackend>) -> Self {
        Self::with_clock(backend, Arc::new(SystemClock))
    }

    pub fn with_clock(backend: Arc<dyn PortalBackend>, clock: Arc<dyn Clock>) -> Self {
        Self { backend, clock }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    async fn viewer(&self, session: &Session) -> Result<Viewer, GuardError> {
        tolerate(Operation::Viewer, self.backend.current_viewer(session).await)
    }

    /// Evaluate the policy table, recording the decision.
    fn authorize(
        &self,
        page: &'static str,
        action: Action,
        request: &AccessRequest<'_>,
    ) -> Decision {
        let decision = authorize(action, request);
        let kind = request.resource.kind();
        let uid = request.viewer.uid.as_deref().unwrap_or("-");

        match decision.reason() {
            Some(denial) => {
                record_decision(
                    kind.as_str(),
                    action.as_str(),
                    decision.label(),
                    Some(denial.reason()),
                );
                log_decision!(
                    info,
                    kind,
                    action,
                    decision.label(),
                    page = page,
                    uid = uid,
                    reason = %denial
                );
            }
            None => {
                record_decision(kind.as_str(), action.as_str(), decision.label(), None);
                log_decision!(debug, kind, action, decision.label(), page = page, uid = uid);
            }
        }

        decision
    }

    /// Role gate only, for pages that refuse before fetching anything.
    fn gate(&self, page: &'static str, kind: ResourceKind, action: Action, viewer: &Viewer) -> bool {
        let admitted = admits_role(kind, action, viewer);
        if !admitted {
            record_decision(kind.as_str(), action.as_str(), "deny", Some("role"));
            log_decision!(
                info,
                kind,
                action,
                "deny",
                page = page,
                uid = viewer.uid.as_deref().unwrap_or("-"),
                reason = "role gate"
            );
        }
        admitted
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// `/manage/events/{id}`
    #[instrument(skip(self, session))]
    pub async fn event_page(&self, session: &Session, id: &str) -> PageResult<EventPage> {
        let result: PageResult<EventPage> = async {
            let now = self.now();
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;

            let decision = self.authorize(
                pages::EVENT,
                Action::Manage,
                &AccessRequest::new(&viewer, Resource::Event(event.as_ref()), now),
            );
            let event = match (decision, event) {
                (Decision::Allow, Some(event)) => event,
                (decision, _) => return Ok(GuardOutcome::denied(decision)),
            };

            let bills = if should_fetch_bills(&event, now) {
                let answer = self.backend.event_bills(session, id).await;
                match unless_event_missing(Operation::EventBills, answer)? {
                    Some(bills) => bills,
                    None => return Ok(GuardOutcome::NotFound),
                }
            } else {
                None
            };

            let clash = if viewer.has_any_role(&[Role::Cc, Role::Slo]) {
                let answer = self.backend.clashing_events(session, id, true).await;
                !tolerate(Operation::ClashingEvents, answer)?.is_empty()
            } else {
                false
            };

            let Some(poc_uid) = event.poc.as_deref() else {
                debug!(event = %event.id, "Event has no point of contact");
                return Ok(GuardOutcome::NotFound);
            };
            let answer = self.backend.user_profile(session, poc_uid).await;
            let Some(poc) = tolerate(Operation::UserProfile, answer)? else {
                debug!(event = %event.id, poc = poc_uid, "Point of contact profile missing");
                return Ok(GuardOutcome::NotFound);
            };

            Ok(GuardOutcome::Render(EventPage {
                actions: available_actions(&event, &viewer, clash, now),
                report: report_section(&event, &viewer, now),
                show_bills: bills_section_visible(&event, bills.as_ref(), &viewer, now),
                clash,
                bills,
                poc,
                event,
            }))
        }
        .await;

        finish(pages::EVENT, result)
    }

    /// `/manage/events/{id}/edit`
    #[instrument(skip(self, session))]
    pub async fn event_edit(&self, session: &Session, id: &str) -> PageResult<EventFormPage> {
        let result: PageResult<EventFormPage> = async {
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;

            let decision = self.authorize(
                pages::EVENT_EDIT,
                Action::Edit,
                &AccessRequest::new(&viewer, Resource::Event(event.as_ref()), self.now()),
            );
            Ok(match (decision, event) {
                (Decision::Allow, Some(event)) => GuardOutcome::Render(EventFormPage { event }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::EVENT_EDIT, result)
    }

    /// `/manage/events/{id}/copy`
    #[instrument(skip(self, session))]
    pub async fn event_copy(&self, session: &Session, id: &str) -> PageResult<EventCopyPage> {
        let result: PageResult<EventCopyPage> = async {
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;

            let decision = self.authorize(
                pages::EVENT_COPY,
                Action::Copy,
                &AccessRequest::new(&viewer, Resource::Event(event.as_ref()), self.now()),
            );
            Ok(match (decision, event) {
                (Decision::Allow, Some(event)) => GuardOutcome::Render(EventCopyPage {
                    draft: EventDraft::from(&event),
                }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::EVENT_COPY, result)
    }

    /// `/manage/events/code/{code}`
    #[instrument(skip(self, session))]
    pub async fn event_by_code(&self, session: &Session, code: &str) -> PageResult<()> {
        let result: PageResult<()> = async {
            let answer = self.backend.event_id_by_code(session, code).await;
            Ok(match tolerate(Operation::EventIdByCode, answer)? {
                Some(id) => GuardOutcome::Redirect(paths::event_page(&id)),
                None => GuardOutcome::NotFound,
            })
        }
        .await;

        finish(pages::EVENT_CODE, result)
    }

    /// `/manage/events/{id}/approve_cc`
    #[instrument(skip(self, session))]
    pub async fn approve_cc(&self, session: &Session, id: &str) -> PageResult<ApproveCcPage> {
        let result: PageResult<ApproveCcPage> = async {
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;

            let decision = self.authorize(
                pages::APPROVE_CC,
                Action::ApproveCc,
                &AccessRequest::new(&viewer, Resource::Event(event.as_ref()), self.now()),
            );
            let event = match (decision, event) {
                (Decision::Allow, Some(event)) => event,
                (decision, _) => return Ok(GuardOutcome::denied(decision)),
            };

            let answer = self.backend.clashing_events(session, id, false).await;
            let clash = !tolerate(Operation::ClashingEvents, answer)?.is_empty();

            let answer = self.backend.club_members(session, COUNCIL_CLUB_ID).await;
            let approvers = current_approvers(tolerate(Operation::ClubMembers, answer)?);

            Ok(GuardOutcome::Render(ApproveCcPage {
                eventid: event.id,
                code: event.code,
                name: event.name,
                clash,
                approvers,
            }))
        }
        .await;

        finish(pages::APPROVE_CC, result)
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    /// `/manage/events/{id}/report`
    #[instrument(skip(self, session))]
    pub async fn report_view(&self, session: &Session, id: &str) -> PageResult<ReportPage> {
        let result: PageResult<ReportPage> = async {
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;
            let report = match &event {
                Some(event) if event.event_report_submitted => {
                    let answer = self.backend.event_report(session, id).await;
                    tolerate(Operation::EventReport, answer)?
                }
                _ => None,
            };

            let decision = self.authorize(
                pages::REPORT,
                Action::View,
                &AccessRequest::new(
                    &viewer,
                    Resource::EventReport {
                        event: event.as_ref(),
                        report: report.as_ref(),
                    },
                    self.now(),
                ),
            );
            let (event, report) = match (decision, event, report) {
                (Decision::Allow, Some(event), Some(report)) => (event, report),
                (decision, _, _) => return Ok(GuardOutcome::denied(decision)),
            };

            let Some(submitter_uid) = report.submitted_by.as_deref() else {
                return Ok(GuardOutcome::NotFound);
            };
            let answer = self.backend.user_profile(session, submitter_uid).await;
            let Some(submitter) = tolerate(Operation::UserProfile, answer)? else {
                debug!(event = %event.id, submitter = submitter_uid, "Report submitter profile missing");
                return Ok(GuardOutcome::NotFound);
            };

            Ok(GuardOutcome::Render(ReportPage {
                event,
                report,
                submitter,
            }))
        }
        .await;

        finish(pages::REPORT, result)
    }

    /// `/manage/events/{id}/report/new`
    #[instrument(skip(self, session))]
    pub async fn report_new(&self, session: &Session, id: &str) -> PageResult<ReportFormPage> {
        let result: PageResult<ReportFormPage> = async {
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;

            let decision = self.authorize(
                pages::REPORT_NEW,
                Action::Create,
                &AccessRequest::new(
                    &viewer,
                    Resource::EventReport {
                        event: event.as_ref(),
                        report: None,
                    },
                    self.now(),
                ),
            );
            Ok(match (decision, event) {
                (Decision::Allow, Some(event)) => GuardOutcome::Render(ReportFormPage {
                    event,
                    report: None,
                    remaining_millis: None,
                }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::REPORT_NEW, result)
    }

    /// `/manage/events/{id}/report/edit`
    #[instrument(skip(self, session))]
    pub async fn report_edit(&self, session: &Session, id: &str) -> PageResult<ReportFormPage> {
        let result: PageResult<ReportFormPage> = async {
            let now = self.now();
            let viewer = self.viewer(session).await?;
            let event = tolerate(Operation::Event, self.backend.event(session, id).await)?;
            let report = match &event {
                Some(event) if event.event_report_submitted => {
                    let answer = self.backend.event_report(session, id).await;
                    tolerate(Operation::EventReport, answer)?
                }
                _ => None,
            };

            let decision = self.authorize(
                pages::REPORT_EDIT,
                Action::Edit,
                &AccessRequest::new(
                    &viewer,
                    Resource::EventReport {
                        event: event.as_ref(),
                        report: report.as_ref(),
                    },
                    now,
                ),
            );
            Ok(match (decision, event, report) {
                (Decision::Allow, Some(event), Some(report)) => {
                    let remaining_millis =
                        remaining_edit_millis(&event, Some(&report), &viewer, now);
                    GuardOutcome::Render(ReportFormPage {
                        event,
                        report: Some(report),
                        remaining_millis,
                    })
                }
                (decision, _, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::REPORT_EDIT, result)
    }

    // =========================================================================
    // BILLS
    // =========================================================================

    /// `/manage/events/{id}/bills`
    ///
    /// Refusals after the role gate render a notice instead of not-found.
    #[instrument(skip(self, session))]
    pub async fn bills_upload(&self, session: &Session, id: &str) -> PageResult<BillsUploadPage> {
        let result: PageResult<BillsUploadPage> = async {
            let viewer = self.viewer(session).await?;
            if !self.gate(pages::BILLS, ResourceKind::EventBills, Action::Upload, &viewer) {
                return Ok(GuardOutcome::NotFound);
            }

            let answer = self.backend.event(session, id).await;
            let Some(event) = unless_event_missing(Operation::Event, answer)? else {
                return Ok(GuardOutcome::NotFound);
            };
            let answer = self.backend.event_bills(session, id).await;
            let Some(bills) = unless_event_missing(Operation::EventBills, answer)? else {
                return Ok(GuardOutcome::NotFound);
            };

            let decision = self.authorize(
                pages::BILLS,
                Action::Upload,
                &AccessRequest::new(
                    &viewer,
                    Resource::EventBills {
                        event: event.as_ref(),
                        bills: bills.as_ref(),
                    },
                    self.now(),
                ),
            );
            Ok(match (decision, event) {
                (Decision::Allow, Some(event)) => GuardOutcome::Render(BillsUploadPage {
                    rows: bill_rows(&event),
                    eventid: event.id,
                    code: event.code,
                    bills: bills.unwrap_or_default(),
                }),
                _ => GuardOutcome::Notice(Notice::new(BILLS_UPLOAD_REFUSED)),
            })
        }
        .await;

        finish(pages::BILLS, result)
    }

    /// `/manage/finances/{id}`
    #[instrument(skip(self, session))]
    pub async fn finance_review(&self, session: &Session, id: &str) -> PageResult<FinancePage> {
        let result: PageResult<FinancePage> = async {
            let viewer = self.viewer(session).await?;

            let event = match self.backend.event(session, id).await {
                Ok(event) => event,
                Err(BackendError::Upstream(e)) => return Ok(finance_notice(&e)),
                Err(e) => return Err(GuardError::backend(Operation::Event.as_str(), e)),
            };
            let bills = match self.backend.event_bills(session, id).await {
                Ok(bills) => bills.unwrap_or_default(),
                Err(BackendError::Upstream(e)) if e.is_missing_bills_status() => {
                    EventBillsStatus::default()
                }
                Err(BackendError::Upstream(e)) => return Ok(finance_notice(&e)),
                Err(e) => return Err(GuardError::backend(Operation::EventBills.as_str(), e)),
            };

            let decision = self.authorize(
                pages::FINANCE,
                Action::Review,
                &AccessRequest::new(
                    &viewer,
                    Resource::EventBills {
                        event: event.as_ref(),
                        bills: Some(&bills),
                    },
                    self.now(),
                ),
            );
            Ok(match (decision, event) {
                (Decision::Allow, Some(event)) => GuardOutcome::Render(FinancePage {
                    rows: bill_rows(&event),
                    can_decide: bills.state == Some(BillsState::Submitted),
                    event,
                    bills,
                }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::FINANCE, result)
    }

    // =========================================================================
    // DIRECTORY
    // =========================================================================

    /// `/manage/clubs/{id}`
    #[instrument(skip(self, session))]
    pub async fn club_page(&self, session: &Session, id: &str) -> PageResult<ClubPage> {
        let result: PageResult<ClubPage> = async {
            let viewer = self.viewer(session).await?;
            let Some(cid) = resolve_club_id(id, &viewer) else {
                return Ok(GuardOutcome::NotFound);
            };
            let club = tolerate(Operation::Club, self.backend.club(session, &cid).await)?;

            let decision = self.authorize(
                pages::CLUB,
                Action::Manage,
                &AccessRequest::new(&viewer, Resource::Club(club.as_ref()), self.now()),
            );
            Ok(match (decision, club) {
                (Decision::Allow, Some(club)) => GuardOutcome::Render(ClubPage {
                    actions: available_club_actions(&club, &viewer),
                    club,
                }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::CLUB, result)
    }

    /// `/manage/clubs/{id}/edit`
    #[instrument(skip(self, session))]
    pub async fn club_edit(&self, session: &Session, id: &str) -> PageResult<ClubFormPage> {
        let result: PageResult<ClubFormPage> = async {
            let viewer = self.viewer(session).await?;
            let Some(cid) = resolve_club_id(id, &viewer) else {
                return Ok(GuardOutcome::NotFound);
            };
            let club = tolerate(Operation::Club, self.backend.club(session, &cid).await)?;

            let decision = self.authorize(
                pages::CLUB_EDIT,
                Action::Edit,
                &AccessRequest::new(&viewer, Resource::Club(club.as_ref()), self.now()),
            );
            Ok(match (decision, club) {
                (Decision::Allow, Some(club)) => GuardOutcome::Render(ClubFormPage { club }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::CLUB_EDIT, result)
    }

    /// `/manage/members/{cid}:{uid}/edit`
    #[instrument(skip(self, session))]
    pub async fn member_edit(&self, session: &Session, key: &str) -> PageResult<MemberFormPage> {
        let result: PageResult<MemberFormPage> = async {
            let Some((cid, uid)) = split_member_key(key) else {
                return Ok(GuardOutcome::NotFound);
            };
            let viewer = self.viewer(session).await?;
            let member = tolerate(Operation::Member, self.backend.member(session, cid, uid).await)?;
            let answer = self.backend.user_profile(session, uid).await;
            let profile = tolerate(Operation::UserProfile, answer)?;

            let decision = self.authorize(
                pages::MEMBER_EDIT,
                Action::Edit,
                &AccessRequest::new(&viewer, Resource::Member(member.as_ref()), self.now()),
            );
            Ok(match (decision, member, profile) {
                (Decision::Allow, Some(member), Some(profile)) => {
                    GuardOutcome::Render(MemberFormPage { member, profile })
                }
                (decision, _, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::MEMBER_EDIT, result)
    }

    /// `/manage/holidays/{id}`
    #[instrument(skip(self, session))]
    pub async fn holiday_edit(&self, session: &Session, id: &str) -> PageResult<HolidayFormPage> {
        let result: PageResult<HolidayFormPage> = async {
            let viewer = self.viewer(session).await?;
            let holiday = tolerate(Operation::Holiday, self.backend.holiday(session, id).await)?;

            let decision = self.authorize(
                pages::HOLIDAY,
                Action::Edit,
                &AccessRequest::new(&viewer, Resource::Holiday(holiday.as_ref()), self.now()),
            );
            Ok(match (decision, holiday) {
                (Decision::Allow, Some(holiday)) => {
                    GuardOutcome::Render(HolidayFormPage { holiday })
                }
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::HOLIDAY, result)
    }

    /// `/docs/{id}`
    #[instrument(skip(self, session))]
    pub async fn doc_edit(&self, session: &Session, id: &str) -> PageResult<DocFormPage> {
        let result: PageResult<DocFormPage> = async {
            let viewer = self.viewer(session).await?;
            if !self.gate(pages::DOC, ResourceKind::StorageFile, Action::Edit, &viewer) {
                return Ok(GuardOutcome::NotFound);
            }
            let answer = self.backend.storage_file(session, id).await;
            let file = tolerate(Operation::StorageFile, answer)?;

            let decision = self.authorize(
                pages::DOC,
                Action::Edit,
                &AccessRequest::new(&viewer, Resource::StorageFile(file.as_ref()), self.now()),
            );
            Ok(match (decision, file) {
                (Decision::Allow, Some(file)) => GuardOutcome::Render(DocFormPage { file }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::DOC, result)
    }

    // =========================================================================
    // PROFILES
    // =========================================================================

    /// `/profile`: the viewer's own profile page.
    #[instrument(skip(self, session))]
    pub async fn own_profile(&self, session: &Session) -> PageResult<()> {
        let result: PageResult<()> = async {
            let viewer = self.viewer(session).await?;
            Ok(match viewer.uid.as_deref() {
                Some(uid) => GuardOutcome::Redirect(paths::profile_page(uid)),
                None => GuardOutcome::NotFound,
            })
        }
        .await;

        finish(pages::PROFILE, result)
    }

    /// `/profile/{id}/edit`
    #[instrument(skip(self, session))]
    pub async fn profile_edit(&self, session: &Session, id: &str) -> PageResult<ProfileFormPage> {
        let result: PageResult<ProfileFormPage> = async {
            let viewer = self.viewer(session).await?;
            let answer = self.backend.user_profile(session, id).await;
            let target = tolerate(Operation::UserProfile, answer)?;
            let memberships = match &target {
                Some(_) => {
                    let answer = self.backend.memberships(session, id).await;
                    Some(tolerate(Operation::Memberships, answer)?)
                }
                None => None,
            };

            let decision = self.authorize(
                pages::PROFILE_EDIT,
                Action::Edit,
                &AccessRequest::new(
                    &viewer,
                    Resource::UserProfile {
                        target: target.as_ref(),
                        memberships: memberships.as_ref().map(Vec::len),
                    },
                    self.now(),
                ),
            );
            Ok(match (decision, target) {
                (Decision::Allow, Some(profile)) => GuardOutcome::Render(ProfileFormPage {
                    profile,
                    memberships: memberships.unwrap_or_default(),
                }),
                (decision, _) => GuardOutcome::denied(decision),
            })
        }
        .await;

        finish(pages::PROFILE_EDIT, result)
    }
}
