//! Navigation authorization.
//!
//! [`RouteGuard`] decides, from the current session, whether a navigation
//! may proceed or must be redirected. Rules are checked in a fixed order and
//! the first match wins:
//!
//! 1. route needs authentication, session anonymous → `/login`
//! 2. route needs admin, user is not admin → `/`
//! 3. route is guest-only, session authenticated → `/`
//! 4. otherwise admit
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use talentboard::guard::{Navigation, RouteGuard, RouteTable};
//! use talentboard::session::{MemoryStorage, SessionStore};
//!
//! let session = SessionStore::load(Arc::new(MemoryStorage::new()));
//! let guard = RouteGuard::new(session, RouteTable::default());
//!
//! assert_eq!(guard.navigate("/messages"), Navigation::redirect("/login"));
//! assert_eq!(guard.navigate("/jobs"), Navigation::Admit);
//! ```

use serde::Serialize;
use tracing::debug;

use crate::session::{Session, SessionStore};

/// Where anonymous users are sent.
pub const LOGIN_PATH: &str = "/login";
/// Where users are sent when a route is not for them.
pub const ROOT_PATH: &str = "/";

/// Authorization requirement attached to a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthRequirement {
    #[default]
    None,
    /// Only for anonymous visitors (login, register).
    GuestOnly,
    RequiresAuth,
    /// Implies authentication.
    RequiresAdmin,
}

/// A static route: path, view name and requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub requirement: AuthRequirement,
}

impl RouteDescriptor {
    pub const fn new(path: &'static str, name: &'static str, requirement: AuthRequirement) -> Self {
        Self {
            path,
            name,
            requirement,
        }
    }
}

/// Application views and their requirements.
pub const DEFAULT_ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor::new("/", "Dashboard", AuthRequirement::None),
    RouteDescriptor::new("/jobs", "Jobs", AuthRequirement::None),
    RouteDescriptor::new("/talents", "Talents", AuthRequirement::None),
    RouteDescriptor::new("/messages", "Messages", AuthRequirement::RequiresAuth),
    RouteDescriptor::new("/profile", "Profile", AuthRequirement::RequiresAuth),
    RouteDescriptor::new("/login", "Login", AuthRequirement::GuestOnly),
    RouteDescriptor::new("/register", "Register", AuthRequirement::GuestOnly),
    RouteDescriptor::new("/admin", "Admin", AuthRequirement::RequiresAdmin),
];

/// Lookup table from path to [`RouteDescriptor`].
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(DEFAULT_ROUTES.to_vec())
    }
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Route registered for `path`.
    ///
    /// Query strings, fragments and a trailing slash are ignored.
    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }
}

fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];
    match path.trim_end_matches('/') {
        "" => ROOT_PATH,
        trimmed => trimmed,
    }
}

/// Outcome of a navigation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum Navigation {
    /// Proceed to the requested route unchanged.
    Admit,
    /// Go to `to` instead.
    Redirect { to: String },
}

impl Navigation {
    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect { to: to.into() }
    }
}

/// Pure decision for `requirement` under `session`.
pub fn decide(requirement: AuthRequirement, session: &Session) -> Navigation {
    use AuthRequirement::{GuestOnly, RequiresAdmin, RequiresAuth};

    let needs_auth = matches!(requirement, RequiresAuth | RequiresAdmin);
    if needs_auth && !session.is_authenticated() {
        Navigation::redirect(LOGIN_PATH)
    } else if requirement == RequiresAdmin && !session.is_admin() {
        Navigation::redirect(ROOT_PATH)
    } else if requirement == GuestOnly && session.is_authenticated() {
        Navigation::redirect(ROOT_PATH)
    } else {
        Navigation::Admit
    }
}

/// Session-aware navigation guard.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionStore,
    routes: RouteTable,
}

impl RouteGuard {
    pub fn new(session: SessionStore, routes: RouteTable) -> Self {
        Self { session, routes }
    }

    /// Check a navigation to `route` against the current session.
    pub fn check(&self, route: &RouteDescriptor) -> Navigation {
        let decision = decide(route.requirement, &self.session.snapshot());
        if let Navigation::Redirect { to } = &decision {
            debug!(name: "guard.redirect", from = route.path, to = %to, "Navigation redirected");
        }
        decision
    }

    /// Check a navigation to `path`; unknown paths carry no requirement.
    pub fn navigate(&self, path: &str) -> Navigation {
        match self.routes.resolve(path) {
            Some(route) => self.check(route),
            None => Navigation::Admit,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_ignores_query_and_trailing_slash() {
        let table = RouteTable::default();
        assert_eq!(table.resolve("/jobs/?page=2").map(|r| r.name), Some("Jobs"));
        assert_eq!(table.resolve("/#top").map(|r| r.name), Some("Dashboard"));
        assert_eq!(table.resolve("").map(|r| r.name), Some("Dashboard"));
        assert!(table.resolve("/nowhere").is_none());
    }

    #[test]
    fn test_anonymous_decisions() {
        let anon = Session::anonymous();
        assert_eq!(decide(AuthRequirement::None, &anon), Navigation::Admit);
        assert_eq!(decide(AuthRequirement::GuestOnly, &anon), Navigation::Admit);
        assert_eq!(
            decide(AuthRequirement::RequiresAuth, &anon),
            Navigation::redirect(LOGIN_PATH)
        );
        assert_eq!(
            decide(AuthRequirement::RequiresAdmin, &anon),
            Navigation::redirect(LOGIN_PATH)
        );
    }

    #[test]
    fn test_navigation_serializes_tagged() {
        let json = serde_json::to_value(Navigation::redirect("/")).unwrap();
        assert_eq!(json, serde_json::json!({"decision": "redirect", "to": "/"}));
    }
}
