//! Security headers middleware.
//!
//! Every response leaves with a Content-Security-Policy built around a
//! fresh nonce. The nonce reaches handlers through the `x-nonce` request
//! header so rendered pages can stamp their inline scripts and styles.

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    response::Response,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::warn;
use uuid::Uuid;

/// Request header carrying the per-request nonce.
pub const NONCE_HEADER: &str = "x-nonce";

const CONTENT_SECURITY_POLICY: HeaderName = HeaderName::from_static("content-security-policy");
const X_CONTENT_TYPE_OPTIONS: HeaderName = HeaderName::from_static("x-content-type-options");
const REFERRER_POLICY: HeaderName = HeaderName::from_static("referrer-policy");

/// Fresh nonce: base64 of a random UUID's text form.
pub fn generate_nonce() -> String {
    BASE64.encode(Uuid::new_v4().to_string())
}

/// Content-Security-Policy value for one response.
pub fn content_security_policy(nonce: &str, path: &str, production: bool) -> String {
    let unsafe_eval = if production { "" } else { " 'unsafe-eval'" };
    let frame_src = if path.contains("/docs") || !production {
        "http://localhost https://clubs.iiit.ac.in https://life.iiit.ac.in"
    } else {
        "https://clubs.iiit.ac.in https://life.iiit.ac.in"
    };

    [
        "default-src 'none'".to_string(),
        format!(
            "script-src 'self' 'nonce-{nonce}' 'strict-dynamic' https: http: 'unsafe-inline' 'wasm-unsafe-eval'{unsafe_eval}"
        ),
        "manifest-src 'self'".to_string(),
        format!("style-src 'self' 'nonce-{nonce}'"),
        "style-src-attr 'self' 'unsafe-inline'".to_string(),
        "style-src-elem 'self' 'unsafe-inline'".to_string(),
        "img-src 'self' blob: data: https://uptime.betterstack.com".to_string(),
        "font-src 'self' data:".to_string(),
        "object-src 'none'".to_string(),
        "base-uri 'self'".to_string(),
        "form-action 'self'".to_string(),
        format!("frame-src {frame_src}"),
        "frame-ancestors 'self' https://*.iiit.ac.in https://iiit.ac.in".to_string(),
        "connect-src 'self' https://api.iconify.design/ https://api.unisvg.com/ https://api.simplesvg.com/".to_string(),
        "upgrade-insecure-requests".to_string(),
    ]
    .join("; ")
        + ";"
}

/// Security headers layer
#[derive(Clone, Default)]
pub struct SecurityHeadersLayer {
    production: bool,
}

impl SecurityHeadersLayer {
    pub fn new(production: bool) -> Self {
        Self { production }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersService {
            inner,
            production: self.production,
        }
    }
}

/// Security headers service
#[derive(Clone)]
pub struct SecurityHeadersService<S> {
    inner: S,
    production: bool,
}

impl<S> Service<Request<Body>> for SecurityHeadersService<S>
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

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();

        let nonce = generate_nonce();
        let csp = content_security_policy(&nonce, req.uri().path(), self.production);

        if let Ok(value) = HeaderValue::from_str(&nonce) {
            req.headers_mut().insert(NONCE_HEADER, value);
        }
        let csp = match HeaderValue::from_str(&csp) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Content-Security-Policy is not a valid header value");
                None
            }
        };

        Box::pin(async move {
            let mut response = inner.call(req).await?;
            let headers = response.headers_mut();
            if let Some(csp) = csp {
                headers.insert(CONTENT_SECURITY_POLICY, csp);
            }
            headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
            headers.insert(
                REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            );
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nonce_is_base64_uuid() {
        let nonce = generate_nonce();
        let decoded = BASE64.decode(&nonce).unwrap();
        let text = String::from_utf8(decoded).unwrap();
        assert!(Uuid::parse_str(&text).is_ok());
        assert_ne!(nonce, generate_nonce());
    }

    #[test]
    fn test_production_policy() {
        let csp = content_security_policy("abc", "/manage/events", true);
        assert!(csp.starts_with("default-src 'none';"));
        assert!(csp.contains("'nonce-abc'"));
        assert!(!csp.contains("'unsafe-eval'"));
        assert!(csp.contains("frame-src https://clubs.iiit.ac.in https://life.iiit.ac.in;"));
        assert!(csp.ends_with("upgrade-insecure-requests;"));
    }

    #[test]
    fn test_development_policy() {
        let csp = content_security_policy("abc", "/", false);
        assert!(csp.contains("'wasm-unsafe-eval' 'unsafe-eval';"));
        assert!(csp.contains("frame-src http://localhost "));
    }

    #[test]
    fn test_docs_widen_frames_in_production() {
        let csp = content_security_policy("abc", "/docs/f1", true);
        assert!(csp.contains("frame-src http://localhost "));
        assert!(!csp.contains("'unsafe-eval'"));
    }

    #[test]
    fn test_policy_is_a_valid_header() {
        let csp = content_security_policy(&generate_nonce(), "/docs", false);
        assert!(HeaderValue::from_str(&csp).is_ok());
    }
}
