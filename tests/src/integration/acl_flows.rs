//! # Route ACL and Page Guards Together
//!
//! The route ACL decides on path and role alone; the page guard behind it
//! then decides on the record. These flows check that the two layers agree
//! and that every response leaves with the security headers.

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::{header::CONTENT_SECURITY_POLICY, StatusCode};

    use lc_03_page_guard::Operation;
    use life_telemetry::{register_metrics, ACCESS_DENIALS, ROUTE_ACL_DECISIONS};
    use shared_types::{Club, Role};

    use crate::fixtures::{body_json, ended_event, location, session_cookie, Portal};

    #[tokio::test]
    async fn test_anonymous_visitor_is_sent_to_login() {
        let portal = Portal::new();

        for path in [
            "/manage/events/ev1",
            "/manage/events/ev1/edit",
            "/manage/events/ev1/report",
            "/manage/clubs/~mine",
            "/manage/holidays/h1",
            "/docs/f1",
        ] {
            let response = portal.get(path, None).await;
            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
            assert_eq!(location(&response), Some(format!("/login{path}")));
        }
        assert!(portal.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_forged_session_counts_as_anonymous() {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let forged = session_cookie("cc", Role::Cc, "not-the-secret");

        // a cookie is present, so no login prompt, but no role either
        let response = portal.get("/manage/events/ev1", Some(&forged)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));
        assert!(portal.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unlisted_role_is_sent_home() {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let slc = portal.sign_in("slc", Role::Slc);
        let student = portal.sign_in("a.b", Role::Public);

        // slc may view the event but not edit it
        let response = portal.get("/manage/events/ev1", Some(&slc)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let response = portal.get("/manage/events/ev1/edit", Some(&slc)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));

        let response = portal.get("/manage/events/ev1", Some(&student)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn test_club_lands_on_its_own_club_page() {
        let portal = Portal::new();
        portal.backend.add_club(Club {
            cid: "drama.club".into(),
            name: "Dramatics Club".into(),
            ..Club::default()
        });
        let club = portal.sign_in("drama.club", Role::Club);
        let cc = portal.sign_in("cc", Role::Cc);

        let response = portal.get("/manage/clubs", Some(&club)).await;
        assert_eq!(location(&response).as_deref(), Some("/manage/clubs/~mine"));

        let response = portal.get("/manage/clubs/~mine", Some(&club)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["club"]["cid"], "drama.club");

        // ~mine is for club accounts only
        let response = portal.get("/manage/clubs/~mine", Some(&cc)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));

        let response = portal.get("/manage/clubs/drama.club", Some(&cc)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_and_hidden_records_look_the_same() {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let outsider = portal.sign_in("art.club", Role::Club);

        let hidden = portal.get("/manage/events/ev1", Some(&outsider)).await;
        let missing = portal.get("/manage/events/ev404", Some(&outsider)).await;

        assert_eq!(hidden.status(), missing.status());
        assert_eq!(location(&hidden), location(&missing));
        assert_eq!(location(&hidden).as_deref(), Some("/404"));
    }

    #[tokio::test]
    async fn test_event_code_resolves_to_event_page() {
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let cc = portal.sign_in("cc", Role::Cc);

        let response = portal.get("/manage/events/code/EVev1", Some(&cc)).await;
        assert_eq!(location(&response).as_deref(), Some("/manage/events/ev1"));
    }

    #[tokio::test]
    async fn test_documents_are_cc_only() {
        let portal = Portal::new();
        let club = portal.sign_in("drama.club", Role::Club);

        // route ACL lets clubs into /docs but not into a document
        let response = portal.get("/docs/f1", Some(&club)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));
        assert!(!portal.backend.was_called(Operation::StorageFile));
    }

    #[tokio::test]
    async fn test_decisions_show_up_in_metrics() {
        assert!(register_metrics().is_ok());
        let portal = Portal::new();
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));
        let student = portal.sign_in("a.b", Role::Public);
        let outsider = portal.sign_in("art.club", Role::Club);

        let forbidden = ROUTE_ACL_DECISIONS.with_label_values(&["forbidden"]).get();
        let not_owner = ACCESS_DENIALS.with_label_values(&["owner"]).get();

        let response = portal.get("/manage/events/ev1", Some(&student)).await;
        assert_eq!(location(&response).as_deref(), Some("/"));
        let response = portal.get("/manage/events/ev1", Some(&outsider)).await;
        assert_eq!(location(&response).as_deref(), Some("/404"));

        assert!(ROUTE_ACL_DECISIONS.with_label_values(&["forbidden"]).get() >= forbidden + 1.0);
        assert!(ACCESS_DENIALS.with_label_values(&["owner"]).get() >= not_owner + 1.0);

        let response = portal.get("/metrics", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let text = match to_bytes(response.into_body(), usize::MAX).await {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => panic!("metrics body: {e}"),
        };
        assert!(text.contains("lc_route_acl_decisions_total"));
        assert!(text.contains("lc_policy_denials_total"));
    }

    #[tokio::test]
    async fn test_every_response_carries_security_headers() {
        let portal = Portal::new();
        let owner = portal.sign_in("drama.club", Role::Club);
        portal.backend.add_event(ended_event("ev1", "drama.club", 1));

        for (path, cookie) in [
            ("/manage/events/ev1", Some(owner.as_str())),
            ("/manage/events/ev1", None),
            ("/404", None),
            ("/health", None),
        ] {
            let response = portal.get(path, cookie).await;
            let csp = response.headers()[CONTENT_SECURITY_POLICY]
                .to_str()
                .unwrap_or_default();
            assert!(csp.contains("'nonce-"), "{path}: {csp}");
            assert!(csp.contains("'unsafe-eval'"), "development policy expected");
        }
    }
}
