//! # Report Lifecycle
//!
//! A club submits a report after its event and may edit it for two days;
//! the Clubs Council shares that window and the Student Life Office gets
//! fourteen days.
//!
//! ```text
//! report/new ──(submitted)──→ redirect report/edit
//! report/edit ──(none yet)──→ redirect report/new
//! report/edit ──(window open)──→ form with time left
//! report/edit ──(window closed)──→ /404
//! ```

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use chrono::Duration;

    use lc_01_access_policy::{REPORT_EDIT_WINDOW_MS, REPORT_EDIT_WINDOW_SLO_MS};
    use shared_types::{EventReport, Role};

    use crate::fixtures::{body_json, ended_event, location, now, Portal};

    const HOUR_MS: i64 = 60 * 60 * 1000;

    /// Portal with `ev1` (drama.club) reported `ago` before now.
    fn reported(ago: Duration) -> Portal {
        let portal = Portal::new();
        let mut event = ended_event("ev1", "drama.club", 1);
        event.event_report_submitted = true;
        portal.backend.add_event(event);

        let mut report = EventReport::submitted("ev1", (now() - ago).to_rfc3339());
        report.submitted_by = Some("poc.user".into());
        report.summary = Some("Forty people turned up".into());
        portal.backend.add_report(report);
        portal
    }

    // =============================================================================
    // CREATE
    // =============================================================================

    #[tokio::test]
    async fn test_owner_opens_report_form_before_submitting() {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let owner = portal.sign_in("drama.club", Role::Club);

        let response = portal.get("/manage/events/ev1/report/new", Some(&owner)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = body_json(response).await;
        assert_eq!(page["event"]["_id"], "ev1");
        assert!(page["report"].is_null());
    }

    #[tokio::test]
    async fn test_second_report_is_sent_to_edit() {
        let portal = reported(Duration::hours(1));
        let owner = portal.sign_in("drama.club", Role::Club);

        let response = portal.get("/manage/events/ev1/report/new", Some(&owner)).await;
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            location(&response).as_deref(),
            Some("/manage/events/ev1/report/edit")
        );
    }

    #[tokio::test]
    async fn test_collaborator_cannot_create_report() {
        let portal = Portal::new();
        let mut event = ended_event("ev1", "drama.club", 1);
        event.collabclubs = vec!["music.club".into()];
        portal.backend.add_event(event);
        let collaborator = portal.sign_in("music.club", Role::Club);

        let response = portal
            .get("/manage/events/ev1/report/new", Some(&collaborator))
            .await;
        assert_eq!(location(&response).as_deref(), Some("/404"));
    }

    // =============================================================================
    // EDIT WINDOW
    // =============================================================================

    #[tokio::test]
    async fn test_edit_before_submitting_is_sent_to_new() {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let owner = portal.sign_in("drama.club", Role::Club);

        let response = portal.get("/manage/events/ev1/report/edit", Some(&owner)).await;
        assert_eq!(
            location(&response).as_deref(),
            Some("/manage/events/ev1/report/new")
        );
    }

    #[tokio::test]
    async fn test_owner_edits_within_two_days() {
        let portal = reported(Duration::hours(1));
        let owner = portal.sign_in("drama.club", Role::Club);

        let response = portal.get("/manage/events/ev1/report/edit", Some(&owner)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = body_json(response).await;
        assert_eq!(page["report"]["summary"], "Forty people turned up");
        assert_eq!(page["remainingMillis"], REPORT_EDIT_WINDOW_MS - HOUR_MS);
    }

    #[tokio::test]
    async fn test_window_closes_for_owner_and_cc_but_not_slo() {
        let portal = reported(Duration::days(3));
        let owner = portal.sign_in("drama.club", Role::Club);
        let cc = portal.sign_in("cc", Role::Cc);
        let slo = portal.sign_in("slo", Role::Slo);

        for cookie in [&owner, &cc] {
            let response = portal.get("/manage/events/ev1/report/edit", Some(cookie)).await;
            assert_eq!(location(&response).as_deref(), Some("/404"));
        }

        let response = portal.get("/manage/events/ev1/report/edit", Some(&slo)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_json(response).await;
        assert_eq!(
            page["remainingMillis"],
            REPORT_EDIT_WINDOW_SLO_MS - 3 * 24 * HOUR_MS
        );
    }

    #[tokio::test]
    async fn test_slo_window_closes_after_fourteen_days() {
        let portal = reported(Duration::days(20));
        let slo = portal.sign_in("slo", Role::Slo);

        let response = portal.get("/manage/events/ev1/report/edit", Some(&slo)).await;
        assert_eq!(location(&response).as_deref(), Some("/404"));
    }

    #[tokio::test]
    async fn test_malformed_submission_time_closes_window() {
        let portal = Portal::new();
        let mut event = ended_event("ev1", "drama.club", 1);
        event.event_report_submitted = true;
        portal.backend.add_event(event);
        portal
            .backend
            .add_report(EventReport::submitted("ev1", "yesterday-ish"));
        let owner = portal.sign_in("drama.club", Role::Club);
        let slo = portal.sign_in("slo", Role::Slo);

        for cookie in [&owner, &slo] {
            let response = portal.get("/manage/events/ev1/report/edit", Some(cookie)).await;
            assert_eq!(location(&response).as_deref(), Some("/404"));
        }
    }

    // =============================================================================
    // VIEW
    // =============================================================================

    #[tokio::test]
    async fn test_report_view_shows_submitter() {
        let portal = reported(Duration::days(5));
        let owner = portal.sign_in("drama.club", Role::Club);
        let outsider = portal.sign_in("art.club", Role::Club);

        let response = portal.get("/manage/events/ev1/report", Some(&owner)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["submitter"]["uid"], "poc.user");

        let response = portal.get("/manage/events/ev1/report", Some(&outsider)).await;
        assert_eq!(location(&response).as_deref(), Some("/404"));
    }
}
