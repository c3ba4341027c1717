//! Route ACL service.
//!
//! Decision order for one request:
//!
//! ```text
//! excluded framework path          ──→ Bypass
//! static redirect                  ──→ StaticRedirect(target)
//! no protected rule matches        ──→ Proceed
//! no session cookie                ──→ Login(/login{path})
//! club account on a club redirect  ──→ ClubRedirect(target)
//! role not listed for the rule     ──→ Forbidden(/)
//! otherwise                        ──→ Proceed
//! ```

use crate::domain::{
    club_redirect, is_excluded, login_path, normalize, session_token, static_redirect,
    ClaimsDecoder, RouteRule, RouteTable, SessionClaims, FORBIDDEN_TARGET, ROUTE_RULES,
};
use crate::error::AclError;
use shared_types::Role;
use tracing::{debug, warn};

/// Outcome of the route ACL for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AclDecision {
    /// Framework path, the ACL does not apply.
    Bypass,
    /// Serve the page.
    Proceed,
    StaticRedirect(String),
    /// Protected page without a session.
    Login(String),
    ClubRedirect(String),
    /// Session present but its role is not listed for the route.
    Forbidden(String),
}

impl AclDecision {
    /// Redirect target, if the decision redirects.
    pub fn location(&self) -> Option<&str> {
        match self {
            AclDecision::Bypass | AclDecision::Proceed => None,
            AclDecision::StaticRedirect(to)
            | AclDecision::Login(to)
            | AclDecision::ClubRedirect(to)
            | AclDecision::Forbidden(to) => Some(to),
        }
    }

    /// Label for logs and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            AclDecision::Bypass => "bypass",
            AclDecision::Proceed => "proceed",
            AclDecision::StaticRedirect(_) => "static_redirect",
            AclDecision::Login(_) => "login",
            AclDecision::ClubRedirect(_) => "club_redirect",
            AclDecision::Forbidden(_) => "forbidden",
        }
    }
}

/// Compiled route ACL plus the session decoder.
#[derive(Debug)]
pub struct RouteAcl {
    table: RouteTable,
    decoder: ClaimsDecoder,
}

impl RouteAcl {
    /// ACL over the portal's route list.
    pub fn new(decoder: ClaimsDecoder) -> Result<Self, AclError> {
        Self::with_rules(ROUTE_RULES, decoder)
    }

    pub fn with_rules(rules: &[RouteRule], decoder: ClaimsDecoder) -> Result<Self, AclError> {
        Ok(Self {
            table: RouteTable::compile(rules)?,
            decoder,
        })
    }

    /// Protected rule governing `path`, if any.
    pub fn protected_rule(&self, path: &str) -> Option<&RouteRule> {
        self.table.first_match(path)
    }

    /// Claims in the session token. Undecodable tokens yield empty claims.
    pub fn claims(&self, token: &str) -> SessionClaims {
        match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                warn!(error = %e, "Session token rejected, treating as anonymous");
                SessionClaims::default()
            }
        }
    }

    /// Decide what to do with a request for `path` carrying `cookie_header`.
    pub fn decide(&self, path: &str, cookie_header: Option<&str>) -> AclDecision {
        if is_excluded(path) {
            return AclDecision::Bypass;
        }

        let normalized = normalize(path);

        if let Some(target) = static_redirect(normalized) {
            return AclDecision::StaticRedirect(target.to_string());
        }

        let Some(rule) = self.table.first_match(normalized) else {
            return AclDecision::Proceed;
        };

        let Some(token) = cookie_header.and_then(session_token) else {
            return AclDecision::Login(login_path(path));
        };

        let claims = self.claims(token);

        if claims.role == Some(Role::Club) {
            if let Some(target) = club_redirect(normalized) {
                return AclDecision::ClubRedirect(target.to_string());
            }
        }

        if !rule.admits(claims.role) {
            debug!(
                path = %path,
                pattern = rule.pattern,
                role = ?claims.role,
                "Role not listed for route"
            );
            return AclDecision::Forbidden(FORBIDDEN_TARGET.to_string());
        }

        AclDecision::Proceed
    }
}
