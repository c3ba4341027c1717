//! Web gateway service: router, middleware stack and HTTP server.

use crate::domain::{GatewayConfig, GatewayError};
use crate::handlers::{self, AppState};
use crate::middleware::{RouteAclLayer, SecurityHeadersLayer, TracingLayer};
use axum::{routing::get, Router};
use lc_02_route_acl::{ClaimsDecoder, RouteAcl};
use lc_03_page_guard::{PageGuard, PortalBackend};
use std::future::Future;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

/// Build the page router with its middleware stack.
///
/// Unknown paths fall through to the 404 page so the route ACL still sees
/// them.
pub fn build_router(state: AppState, acl: Arc<RouteAcl>, config: &GatewayConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TracingLayer::new())
        .layer(SecurityHeadersLayer::new(config.security.production))
        .layer(TimeoutLayer::new(config.http.request_timeout))
        .layer(RouteAclLayer::new(acl));

    Router::new()
        // Events
        .route("/manage/events/:id", get(handlers::event_page))
        .route("/manage/events/:id/edit", get(handlers::event_edit))
        .route("/manage/events/:id/copy", get(handlers::event_copy))
        .route("/manage/events/:id/approve_cc", get(handlers::approve_cc))
        .route("/manage/events/code/:code", get(handlers::event_by_code))
        // Reports and bills
        .route("/manage/events/:id/report", get(handlers::report_view))
        .route("/manage/events/:id/report/new", get(handlers::report_new))
        .route("/manage/events/:id/report/edit", get(handlers::report_edit))
        .route("/manage/events/:id/bills", get(handlers::bills_upload))
        .route("/manage/finances/:id", get(handlers::finance_review))
        // Directory
        .route("/manage/clubs/:id", get(handlers::club_page))
        .route("/manage/clubs/:id/edit", get(handlers::club_edit))
        .route("/manage/members/:key/edit", get(handlers::member_edit))
        .route("/manage/holidays/:id", get(handlers::holiday_edit))
        .route("/docs/:id", get(handlers::doc_edit))
        .route("/profile", get(handlers::own_profile))
        .route("/profile/:id/edit", get(handlers::profile_edit))
        // Service routes
        .route("/404", get(handlers::not_found))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .fallback(handlers::not_found)
        .layer(middleware)
        .with_state(state)
}

/// HTTP gateway for the guarded portal pages.
pub struct WebGateway {
    config: GatewayConfig,
    router: Router,
}

impl WebGateway {
    /// Create a gateway over `backend`.
    pub fn new(config: GatewayConfig, backend: Arc<dyn PortalBackend>) -> Result<Self, GatewayError> {
        Self::with_guard(config, PageGuard::new(backend))
    }

    /// Create a gateway around an existing page guard.
    pub fn with_guard(config: GatewayConfig, guard: PageGuard) -> Result<Self, GatewayError> {
        config.validate()?;

        let decoder = ClaimsDecoder::from_secret(config.session.jwt_secret.as_deref());
        if !decoder.is_verifying() {
            warn!("No session secret configured, session tokens are read unverified");
        }
        let acl = Arc::new(RouteAcl::new(decoder)?);

        let state = AppState {
            guard: Arc::new(guard),
        };
        let router = build_router(state, acl, &config);

        Ok(Self { config, router })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The router, for serving elsewhere or driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(GatewayError::Bind)?;

        info!(
            addr = %addr,
            production = self.config.security.production,
            backend = %self.config.backend.endpoint,
            "Web gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)?;

        info!("Web gateway stopped");
        Ok(())
    }
}
