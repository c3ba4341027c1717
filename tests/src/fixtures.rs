//! # Test Fixtures
//!
//! A portal wired the way `portal-runtime` wires it, with the GraphQL
//! service replaced by [`InMemoryBackend`] and the clock pinned to [`NOW`].

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::COOKIE, header::LOCATION, Request},
    response::Response,
    Router,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use lc_01_access_policy::FixedClock;
use lc_03_page_guard::{InMemoryBackend, PageGuard};
use lc_04_web_gateway::{GatewayConfig, WebGateway};
use shared_types::{parse_instant, BudgetRow, Event, EventState, Role, UserProfile, Viewer};

/// Instant every fixture is relative to.
pub const NOW: &str = "2024-06-15T12:00:00Z";

/// Session secret shared by the fixture gateway and its tokens.
pub const SESSION_SECRET: &str = "fixture-session-secret";

pub fn now() -> DateTime<Utc> {
    parse_instant(NOW).unwrap_or_default()
}

/// `Cookie` header carrying a session token signed with `secret`.
pub fn session_cookie(uid: &str, role: Role, secret: &str) -> String {
    let token = encode(
        &Header::default(),
        &json!({ "uid": uid, "role": role }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap_or_default();
    format!("Authorization={token}")
}

/// Approved event of `clubid` that ended `days_ago` days before [`NOW`].
pub fn ended_event(id: &str, clubid: &str, days_ago: i64) -> Event {
    let mut event = Event::new(id, clubid, EventState::Approved);
    event.code = Some(format!("EV{id}"));
    event.poc = Some("poc.user".into());
    event.datetimeperiod = Some((
        now() - Duration::days(days_ago) - Duration::hours(3),
        now() - Duration::days(days_ago),
    ));
    event.budget = vec![BudgetRow {
        amount: 2500.0,
        description: Some("sound system".into()),
        ..BudgetRow::default()
    }];
    event
}

/// The portal under test.
pub struct Portal {
    pub backend: Arc<InMemoryBackend>,
    router: Router,
}

impl Portal {
    pub fn new() -> Self {
        let backend = Arc::new(InMemoryBackend::new());
        backend.add_profile(UserProfile {
            uid: "poc.user".into(),
            role: Some(Role::Public),
            ..UserProfile::default()
        });

        let mut config = GatewayConfig::default();
        config.session.jwt_secret = Some(SESSION_SECRET.to_string());

        let guard = PageGuard::with_clock(backend.clone(), Arc::new(FixedClock(now())));
        let router = match WebGateway::with_guard(config, guard) {
            Ok(gateway) => gateway.router(),
            Err(e) => panic!("fixture gateway rejected: {e}"),
        };

        Self { backend, router }
    }

    /// Sign `uid` in and return their cookie header.
    pub fn sign_in(&self, uid: &str, role: Role) -> String {
        let cookie = session_cookie(uid, role, SESSION_SECRET);
        self.backend.sign_in(cookie.clone(), Viewer::new(uid, role));
        cookie
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let request = match request.body(Body::empty()) {
            Ok(request) => request,
            Err(e) => panic!("bad request for {path}: {e}"),
        };
        match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(e) => match e {},
        }
    }
}

impl Default for Portal {
    fn default() -> Self {
        Self::new()
    }
}

/// `Location` header, if any.
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Body parsed as JSON, `Null` when it is not JSON.
pub async fn body_json(response: Response) -> Value {
    match to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        Err(_) => Value::Null,
    }
}
