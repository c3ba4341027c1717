//! Middleware stack for the web gateway.
//!
//! Layer order: Request → Tracing → SecurityHeaders → Timeout → RouteAcl → Handler
//!
//! Security headers wrap the ACL so that its redirects carry the same
//! headers as rendered pages.

pub mod route_acl;
pub mod security_headers;
pub mod tracing;

pub use self::tracing::{TracingLayer, REQUEST_ID_HEADER};
pub use route_acl::{is_prefetch, RouteAclLayer};
pub use security_headers::{
    content_security_policy, generate_nonce, SecurityHeadersLayer, NONCE_HEADER,
};
