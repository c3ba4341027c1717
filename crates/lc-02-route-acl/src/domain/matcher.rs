//! Ordered pattern matching.
//!
//! Each rule gets its own `matchit` router so that evaluation order is the
//! order of the rule list, not the router's static-over-dynamic priority.
//!
//! `matchit` compares bytes exactly, so paths are lower-cased before lookup
//! and `/Manage/Events/new` hits the same rule as `/manage/events/new`. Every
//! pattern in the list is lower case.

use crate::domain::routes::RouteRule;
use crate::error::AclError;
use matchit::Router;
use std::borrow::Cow;

/// Compiled route list.
pub struct RouteTable {
    entries: Vec<(Router<()>, RouteRule)>,
}

impl RouteTable {
    /// Compile `rules`, keeping their order.
    pub fn compile(rules: &[RouteRule]) -> Result<Self, AclError> {
        let mut entries = Vec::with_capacity(rules.len());
        for rule in rules {
            let mut router = Router::new();
            router
                .insert(rule.pattern, ())
                .map_err(|source| AclError::InvalidPattern {
                    pattern: rule.pattern.to_string(),
                    source,
                })?;
            entries.push((router, *rule));
        }
        Ok(Self { entries })
    }

    /// First rule whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<&RouteRule> {
        let path = lowercase(normalize(path));
        self.entries
            .iter()
            .find(|(router, _)| router.at(&path).is_ok())
            .map(|(_, rule)| rule)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(_, rule)| rule.pattern))
            .finish()
    }
}

/// Strip trailing slashes, keeping the root path intact.
pub fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

fn lowercase(path: &str) -> Cow<'_, str> {
    if path.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(path.to_ascii_lowercase())
    } else {
        Cow::Borrowed(path)
    }
}
