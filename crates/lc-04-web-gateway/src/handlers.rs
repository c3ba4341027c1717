//! HTTP handlers for the guarded pages.
//!
//! Each handler forwards the request's `Cookie` header to the page guard
//! and turns the outcome into a response:
//!
//! ```text
//! Render(view)      ──→ 200 JSON view model
//! Redirect(target)  ──→ 307 Location: target
//! NotFound          ──→ 307 Location: /404
//! Notice(notice)    ──→ 200 JSON notice
//! Err(GuardError)   ──→ 500 error boundary
//! ```

use crate::domain::ErrorBoundary;
use axum::{
    extract::{Path, State},
    http::{header::COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use lc_01_access_policy::paths;
use lc_03_page_guard::{GuardOutcome, PageGuard, PageResult, Session};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<PageGuard>,
}

/// Session of the incoming request.
fn session(headers: &HeaderMap) -> Session {
    Session::new(
        headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    )
}

/// Response for a page guard result.
pub struct PageResponse<V>(pub PageResult<V>);

impl<V: Serialize> IntoResponse for PageResponse<V> {
    fn into_response(self) -> Response {
        match self.0 {
            Ok(GuardOutcome::Render(view)) => (StatusCode::OK, Json(view)).into_response(),
            Ok(GuardOutcome::Redirect(target)) => Redirect::temporary(&target).into_response(),
            Ok(GuardOutcome::NotFound) => Redirect::temporary(paths::NOT_FOUND).into_response(),
            Ok(GuardOutcome::Notice(notice)) => (StatusCode::OK, Json(notice)).into_response(),
            Err(e) => {
                error!(error = %e, "Page guard failed");
                ErrorBoundary::from(&e).into_response()
            }
        }
    }
}

// =============================================================================
// EVENTS
// =============================================================================

pub async fn event_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.event_page(&session(&headers), &id).await)
}

pub async fn event_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.event_edit(&session(&headers), &id).await)
}

pub async fn event_copy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.event_copy(&session(&headers), &id).await)
}

pub async fn event_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.event_by_code(&session(&headers), &code).await)
}

pub async fn approve_cc(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.approve_cc(&session(&headers), &id).await)
}

// =============================================================================
// REPORTS AND BILLS
// =============================================================================

pub async fn report_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.report_view(&session(&headers), &id).await)
}

pub async fn report_new(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.report_new(&session(&headers), &id).await)
}

pub async fn report_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.report_edit(&session(&headers), &id).await)
}

pub async fn bills_upload(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.bills_upload(&session(&headers), &id).await)
}

pub async fn finance_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.finance_review(&session(&headers), &id).await)
}

// =============================================================================
// DIRECTORY AND PROFILES
// =============================================================================

pub async fn club_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.club_page(&session(&headers), &id).await)
}

pub async fn club_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.club_edit(&session(&headers), &id).await)
}

pub async fn member_edit(
    State(state): State<AppState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.member_edit(&session(&headers), &key).await)
}

pub async fn holiday_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.holiday_edit(&session(&headers), &id).await)
}

pub async fn doc_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.doc_edit(&session(&headers), &id).await)
}

pub async fn own_profile(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    PageResponse(state.guard.own_profile(&session(&headers)).await)
}

pub async fn profile_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    PageResponse(state.guard.profile_edit(&session(&headers), &id).await)
}

// =============================================================================
// SERVICE ROUTES
// =============================================================================

/// The page every denial lands on.
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Page not found" })),
    )
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

/// Prometheus text exposition.
pub async fn metrics() -> Response {
    match life_telemetry::encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
