//! Route access-control list.
//!
//! Format: path pattern → roles with access. Patterns use `:param` segments.
//! Evaluation is first match wins, so literal paths must precede their
//! parameterised siblings.
//!
//! Public pages (`/`, `/about`, `/events`, `/events/:id`, `/clubs`,
//! `/clubs/:id`, `/calendar`, `/student-bodies`) are deliberately absent:
//! an unlisted path is unprotected.

use shared_types::Role;
use shared_types::Role::{Cc, Club, Public, Slc, Slo};

/// One protected path pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub pattern: &'static str,
    pub roles: &'static [Role],
}

impl RouteRule {
    const fn new(pattern: &'static str, roles: &'static [Role]) -> Self {
        Self { pattern, roles }
    }

    pub fn admits(&self, role: Option<Role>) -> bool {
        role.is_some_and(|r| self.roles.contains(&r))
    }
}

/// Protected routes, in evaluation order.
pub const ROUTE_RULES: &[RouteRule] = &[
    RouteRule::new("/cc-recruitments", &[Public, Cc]),
    RouteRule::new("/cc-recruitments/all", &[Cc]),
    RouteRule::new("/cc-recruitments/all/:id", &[Cc]),
    RouteRule::new("/docs", &[Cc, Slo, Club, Slc]),
    RouteRule::new("/docs/:id", &[Cc]),
    RouteRule::new("/docs/new", &[Cc]),
    // --- members ---
    RouteRule::new("/manage/members", &[Cc, Club]),
    RouteRule::new("/manage/members/new", &[Cc, Club]),
    RouteRule::new("/manage/members/bulk-add", &[Cc, Club]),
    RouteRule::new("/manage/members/bulk-edit", &[Cc, Club]),
    RouteRule::new("/manage/members/:id", &[Cc, Club]),
    RouteRule::new("/manage/members/:id/edit", &[Cc, Club]),
    RouteRule::new("/manage/data-members", &[Cc, Club, Slo]),
    // --- events ---
    RouteRule::new("/manage/events", &[Cc, Club, Slc, Slo]),
    RouteRule::new("/manage/events/new", &[Cc, Club]),
    RouteRule::new("/manage/events/:id", &[Cc, Club, Slc, Slo]),
    RouteRule::new("/manage/events/:id/edit", &[Cc, Club, Slo]),
    RouteRule::new("/manage/events/:id/report", &[Cc, Club, Slo]),
    RouteRule::new("/manage/events/:id/report/new", &[Cc, Club]),
    RouteRule::new("/manage/data-events", &[Cc, Club, Slc, Slo]),
    RouteRule::new("/manage/finances", &[Cc, Club, Slo]),
    RouteRule::new("/manage/finances/:id", &[Slo]),
    // --- clubs ---
    RouteRule::new("/manage/clubs", &[Cc]),
    RouteRule::new("/manage/clubs/new", &[Cc]),
    RouteRule::new("/manage/clubs/~mine", &[Club]),
    RouteRule::new("/manage/clubs/~mine/edit", &[Club]),
    RouteRule::new("/manage/clubs/:id", &[Cc]),
    RouteRule::new("/manage/clubs/:id/edit", &[Cc]),
    // --- holidays ---
    RouteRule::new("/manage/holidays", &[Cc, Slo]),
    RouteRule::new("/manage/holidays/new", &[Cc, Slo]),
    RouteRule::new("/manage/holidays/:id", &[Cc, Slo]),
];

/// Unconditional redirects, checked before anything else.
pub const STATIC_REDIRECTS: &[(&str, &str)] =
    &[("/student-bodies/clubs", "/student-bodies/clubs-council")];

/// Redirects applied only to club accounts on protected routes.
pub const CLUB_REDIRECTS: &[(&str, &str)] = &[("/manage/clubs", "/manage/clubs/~mine")];

/// Path prefixes that never reach the ACL (API routes, build assets,
/// metadata files). Matched right after the leading slash, so `/apiary`
/// is excluded along with `/api`.
pub const EXCLUDED_PREFIXES: &[&str] = &[
    "api",
    "_next/static",
    "_next/image",
    "favicon.ico",
    "sitemap.xml",
    "robots.txt",
];

/// Path the viewer is sent to when the route exists but their role is not listed.
pub const FORBIDDEN_TARGET: &str = "/";

/// Login page for a protected path.
pub fn login_path(path: &str) -> String {
    format!("/login{path}")
}

pub fn is_excluded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    EXCLUDED_PREFIXES.iter().any(|p| rest.starts_with(p))
}

pub fn static_redirect(path: &str) -> Option<&'static str> {
    lookup(STATIC_REDIRECTS, path)
}

/// Club redirects match without regard to case, like the route list.
pub fn club_redirect(path: &str) -> Option<&'static str> {
    CLUB_REDIRECTS
        .iter()
        .find(|(from, _)| from.eq_ignore_ascii_case(path))
        .map(|(_, to)| *to)
}

fn lookup(table: &'static [(&'static str, &'static str)], path: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == path)
        .map(|(_, to)| *to)
}
