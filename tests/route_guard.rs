use std::sync::Arc;

use serde_json::json;
use talentboard::guard::{AuthRequirement, Navigation, RouteDescriptor, RouteGuard, RouteTable};
use talentboard::session::{MemoryStorage, SessionStorage, SessionStore, TOKEN_KEY};
use talentboard::types::UserProfile;

const MESSAGES: RouteDescriptor =
    RouteDescriptor::new("/messages", "Messages", AuthRequirement::RequiresAuth);
const ADMIN: RouteDescriptor =
    RouteDescriptor::new("/admin", "Admin", AuthRequirement::RequiresAdmin);
const LOGIN: RouteDescriptor = RouteDescriptor::new("/login", "Login", AuthRequirement::GuestOnly);
const JOBS: RouteDescriptor = RouteDescriptor::new("/jobs", "Jobs", AuthRequirement::None);

fn guard() -> (RouteGuard, SessionStore) {
    let session = SessionStore::load(Arc::new(MemoryStorage::new()));
    (RouteGuard::new(session.clone(), RouteTable::default()), session)
}

fn profile(role: &str) -> UserProfile {
    serde_json::from_value(json!({"id": "u1", "role": role})).unwrap()
}

#[test]
fn test_anonymous_to_protected_redirects_to_login() {
    let (guard, _) = guard();
    assert_eq!(guard.check(&MESSAGES), Navigation::redirect("/login"));
    assert_eq!(guard.check(&ADMIN), Navigation::redirect("/login"));
}

#[test]
fn test_non_admin_to_admin_redirects_to_root() {
    let (guard, session) = guard();
    session.login(profile("talent"), "t1").unwrap();
    assert_eq!(guard.check(&ADMIN), Navigation::redirect("/"));
}

#[test]
fn test_admin_is_admitted_to_admin() {
    let (guard, session) = guard();
    session.login(profile("admin"), "t1").unwrap();
    assert_eq!(guard.check(&ADMIN), Navigation::Admit);
}

#[test]
fn test_authenticated_to_guest_only_redirects_to_root() {
    let (guard, session) = guard();
    session.login(profile("talent"), "t1").unwrap();
    assert_eq!(guard.check(&LOGIN), Navigation::redirect("/"));
    assert_eq!(guard.navigate("/register"), Navigation::redirect("/"));
}

#[test]
fn test_anonymous_to_unrestricted_is_admitted() {
    let (guard, _) = guard();
    assert_eq!(guard.check(&JOBS), Navigation::Admit);
    assert_eq!(guard.check(&LOGIN), Navigation::Admit);
    assert_eq!(guard.navigate("/unknown/page"), Navigation::Admit);
}

#[test]
fn test_guard_follows_session_changes() {
    let (guard, session) = guard();
    assert_eq!(guard.navigate("/profile"), Navigation::redirect("/login"));

    session.login(profile("talent"), "t1").unwrap();
    assert_eq!(guard.navigate("/profile"), Navigation::Admit);

    session.logout().unwrap();
    assert_eq!(guard.navigate("/profile"), Navigation::redirect("/login"));
}

#[test]
fn test_token_without_user_is_not_admin() {
    let storage = MemoryStorage::new();
    let session = SessionStore::load(Arc::new(storage.clone()));
    let guard = RouteGuard::new(session.clone(), RouteTable::default());

    storage.set_item(TOKEN_KEY, "t1").unwrap();
    session.sync();

    assert_eq!(guard.navigate("/messages"), Navigation::Admit);
    assert_eq!(guard.navigate("/admin"), Navigation::redirect("/"));
}

#[test]
fn test_custom_route_table() {
    let session = SessionStore::load(Arc::new(MemoryStorage::new()));
    let table = RouteTable::new(vec![RouteDescriptor::new(
        "/dashboard",
        "Dashboard",
        AuthRequirement::RequiresAuth,
    )]);
    let guard = RouteGuard::new(session, table);

    assert_eq!(guard.navigate("/dashboard"), Navigation::redirect("/login"));
    assert_eq!(guard.navigate("/messages"), Navigation::Admit);
    assert_eq!(guard.routes().routes().len(), 1);
}
