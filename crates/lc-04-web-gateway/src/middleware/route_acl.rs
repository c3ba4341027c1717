//! Route ACL middleware.
//!
//! Runs `lc-02-route-acl` on every request before it reaches a handler.
//! Router prefetches skip the check; the real navigation that follows is
//! checked as usual.

use axum::{
    body::Body,
    http::{header::COOKIE, HeaderMap, Request},
    response::{IntoResponse, Redirect, Response},
};
use lc_02_route_acl::{AclDecision, RouteAcl};
use life_telemetry::{log_route, metric_inc, ROUTE_ACL_DECISIONS};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// True for speculative router prefetches.
pub fn is_prefetch(headers: &HeaderMap) -> bool {
    headers.contains_key("next-router-prefetch")
        || headers
            .get("purpose")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "prefetch")
}

/// Route ACL layer
#[derive(Clone)]
pub struct RouteAclLayer {
    acl: Arc<RouteAcl>,
}

impl RouteAclLayer {
    pub fn new(acl: Arc<RouteAcl>) -> Self {
        Self { acl }
    }
}

impl<S> Layer<S> for RouteAclLayer {
    type Service = RouteAclService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RouteAclService {
            inner,
            acl: Arc::clone(&self.acl),
        }
    }
}

/// Route ACL service
#[derive(Clone)]
pub struct RouteAclService<S> {
    inner: S,
    acl: Arc<RouteAcl>,
}

impl<S> Service<Request<Body>> for RouteAclService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        if is_prefetch(req.headers()) {
            return Box::pin(async move { inner.call(req).await });
        }

        let path = req.uri().path().to_string();
        let cookie = req
            .headers()
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let decision = self.acl.decide(&path, cookie.as_deref());

        metric_inc!(ROUTE_ACL_DECISIONS, &[decision.outcome()]);

        match decision.location() {
            Some(target) => {
                log_route!(info, path, decision.outcome(), location = target);
                let response = Redirect::temporary(target).into_response();
                Box::pin(async move { Ok::<_, S::Error>(response) })
            }
            None => {
                if decision != AclDecision::Bypass {
                    log_route!(debug, path, decision.outcome());
                }
                Box::pin(async move { inner.call(req).await })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_prefetch_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_prefetch(&headers));

        headers.insert("purpose", HeaderValue::from_static("navigate"));
        assert!(!is_prefetch(&headers));

        headers.insert("purpose", HeaderValue::from_static("prefetch"));
        assert!(is_prefetch(&headers));

        let mut headers = HeaderMap::new();
        headers.insert("next-router-prefetch", HeaderValue::from_static("1"));
        assert!(is_prefetch(&headers));
    }
}
