//! # Bills and Finance Review
//!
//! After an approved event the owning club uploads bills; the Student Life
//! Office reviews them from the finances page.

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use lc_03_page_guard::{Operation, BILLS_UPLOAD_REFUSED};
    use shared_types::{BillsState, EventBillsStatus, Role, UpstreamError};

    use crate::fixtures::{body_json, ended_event, location, Portal};

    fn portal_with_bills(state: BillsState) -> Portal {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 2));
        portal
            .backend
            .set_bills("ev1", EventBillsStatus::with_state(state));
        portal
    }

    #[tokio::test]
    async fn test_owner_uploads_pending_bills() {
        for state in [BillsState::NotSubmitted, BillsState::Rejected] {
            let portal = portal_with_bills(state);
            let owner = portal.sign_in("drama.club", Role::Club);

            let response = portal.get("/manage/events/ev1/bills", Some(&owner)).await;
            assert_eq!(response.status(), StatusCode::OK);

            let page = body_json(response).await;
            assert_eq!(page["eventid"], "ev1");
            assert_eq!(page["rows"][0]["amountUsed"], 2500.0);
        }
    }

    #[tokio::test]
    async fn test_submitted_bills_show_a_notice() {
        let portal = portal_with_bills(BillsState::Submitted);
        let owner = portal.sign_in("drama.club", Role::Club);
        let outsider = portal.sign_in("art.club", Role::Club);

        for cookie in [&owner, &outsider] {
            let response = portal.get("/manage/events/ev1/bills", Some(cookie)).await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(body_json(response).await["message"], BILLS_UPLOAD_REFUSED);
        }
    }

    #[tokio::test]
    async fn test_bills_page_needs_a_club_account() {
        let portal = portal_with_bills(BillsState::NotSubmitted);
        let cc = portal.sign_in("cc", Role::Cc);

        let response = portal.get("/manage/events/ev1/bills", Some(&cc)).await;
        assert_eq!(location(&response).as_deref(), Some("/404"));
        assert!(!portal.backend.was_called(Operation::Event));
    }

    #[tokio::test]
    async fn test_slo_reviews_submitted_bills() {
        let portal = portal_with_bills(BillsState::Submitted);
        let slo = portal.sign_in("slo", Role::Slo);

        let response = portal.get("/manage/finances/ev1", Some(&slo)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let page = body_json(response).await;
        assert_eq!(page["canDecide"], true);
        assert_eq!(page["bills"]["state"], "submitted");
    }

    #[tokio::test]
    async fn test_pending_bills_are_not_reviewable() {
        let portal = portal_with_bills(BillsState::NotSubmitted);
        let slo = portal.sign_in("slo", Role::Slo);

        let response = portal.get("/manage/finances/ev1", Some(&slo)).await;
        assert_eq!(location(&response).as_deref(), Some("/404"));
    }

    #[tokio::test]
    async fn test_graphql_error_becomes_finance_notice() {
        let portal = portal_with_bills(BillsState::Submitted);
        portal
            .backend
            .fail_with(Operation::Event, UpstreamError::graphql("Database offline"));
        let slo = portal.sign_in("slo", Role::Slo);

        let response = portal.get("/manage/finances/ev1", Some(&slo)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let notice = body_json(response).await;
        assert_eq!(notice["message"], "Error: Database offline");
        assert_eq!(notice["back"], "/manage/finances");
    }

    #[tokio::test]
    async fn test_transport_failure_reaches_error_boundary() {
        let portal = portal_with_bills(BillsState::Submitted);
        portal.backend.fail_status(Operation::EventBills, 503);
        let slo = portal.sign_in("slo", Role::Slo);

        let response = portal.get("/manage/finances/ev1", Some(&slo)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_json(response).await["details"]
            .as_str()
            .is_some_and(|d| d.contains("503")));
    }

    #[tokio::test]
    async fn test_finances_are_slo_only() {
        let portal = portal_with_bills(BillsState::Submitted);
        let cc = portal.sign_in("cc", Role::Cc);

        let response = portal.get("/manage/finances/ev1", Some(&cc)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));
    }
}
