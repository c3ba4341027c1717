//! Domain layer for the route ACL.

pub mod claims;
pub mod matcher;
pub mod routes;

pub use claims::{session_token, ClaimsDecoder, SessionClaims, SESSION_COOKIE};
pub use matcher::{normalize, RouteTable};
pub use routes::{
    club_redirect, is_excluded, login_path, static_redirect, RouteRule, CLUB_REDIRECTS,
    EXCLUDED_PREFIXES, FORBIDDEN_TARGET, ROUTE_RULES, STATIC_REDIRECTS,
};
