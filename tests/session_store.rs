use std::sync::Arc;

use serde_json::json;
use talentboard::Error;
use talentboard::session::{
    FileStorage, MemoryStorage, SessionStorage, SessionStore, StorageError, TOKEN_KEY, USER_KEY,
};
use talentboard::types::UserProfile;

fn user(id: &str, role: &str) -> UserProfile {
    serde_json::from_value(json!({"id": id, "name": "Sophie Laurent", "role": role})).unwrap()
}

fn assert_invariant(store: &SessionStore) {
    assert_eq!(store.is_authenticated(), store.token().is_some());
    let snapshot = store.snapshot();
    assert_eq!(snapshot.is_authenticated(), snapshot.token().is_some());
}

/// Storage that accepts reads but refuses writes, like a full or disabled
/// browser storage.
#[derive(Debug, Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl SessionStorage for ReadOnlyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("quota exceeded".into()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

/// Storage whose reads always fail.
#[derive(Debug)]
struct BrokenStorage;

impl SessionStorage for BrokenStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

/// Storage that stores everything except the token.
#[derive(Debug, Clone, Default)]
struct TokenRejectingStorage {
    inner: MemoryStorage,
}

impl SessionStorage for TokenRejectingStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == TOKEN_KEY {
            return Err(StorageError::Unavailable("quota exceeded".into()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key)
    }
}

#[test]
fn test_invariant_holds_across_operations() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::load(storage.clone());
    assert_invariant(&store);

    store.login(user("u1", "talent"), "t1").unwrap();
    assert_invariant(&store);
    assert!(store.is_authenticated());

    store.logout().unwrap();
    assert_invariant(&store);

    storage.set_item(TOKEN_KEY, "t2").unwrap();
    store.sync();
    assert_invariant(&store);
    assert!(store.is_authenticated());
    assert_eq!(store.user(), None);

    storage.remove_item(TOKEN_KEY).unwrap();
    storage.set_item(USER_KEY, r#"{"id":"u3"}"#).unwrap();
    store.sync();
    assert_invariant(&store);
    assert!(!store.is_authenticated());
}

#[test]
fn test_login_round_trips_through_storage() {
    let storage = Arc::new(MemoryStorage::new());
    let profile = user("u1", "admin");

    SessionStore::load(storage.clone())
        .login(profile.clone(), "secret-token")
        .unwrap();

    let reloaded = SessionStore::load(storage);
    assert_eq!(reloaded.user(), Some(profile));
    assert_eq!(reloaded.token().as_deref(), Some("secret-token"));
    assert_eq!(reloaded.role().as_deref(), Some("admin"));
}

#[test]
fn test_login_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let profile = user("u2", "recruiter");

    SessionStore::load(Arc::new(FileStorage::new(&path)))
        .login(profile.clone(), "file-token")
        .unwrap();

    let reloaded = SessionStore::load(Arc::new(FileStorage::new(&path)));
    assert_eq!(reloaded.user(), Some(profile));
    assert_eq!(reloaded.token().as_deref(), Some("file-token"));
}

#[test]
fn test_logout_is_idempotent() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::load(storage.clone());
    store.login(user("u1", "talent"), "t1").unwrap();

    store.logout().unwrap();
    let once = store.snapshot();
    store.logout().unwrap();

    assert_eq!(store.snapshot(), once);
    assert!(!store.is_authenticated());
    assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
}

#[test]
fn test_logout_when_anonymous_is_noop() {
    let store = SessionStore::load(Arc::new(MemoryStorage::new()));
    assert!(store.logout().is_ok());
    assert!(!store.is_authenticated());
}

#[test]
fn test_malformed_user_loads_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(USER_KEY, "{not json").unwrap();
    storage.set_item(TOKEN_KEY, "t1").unwrap();

    let store = SessionStore::load(Arc::new(storage));
    assert_eq!(store.user(), None);
    assert!(store.is_authenticated());
}

#[test]
fn test_unreadable_storage_loads_anonymous() {
    let store = SessionStore::load(Arc::new(BrokenStorage));
    assert!(!store.is_authenticated());
    assert_eq!(store.user(), None);

    store.sync();
    assert!(!store.is_authenticated());
}

#[test]
fn test_persistence_failure_is_surfaced_but_state_updates() {
    let store = SessionStore::load(Arc::new(ReadOnlyStorage::default()));

    let err = store.login(user("u1", "talent"), "t1").unwrap_err();
    assert!(matches!(err, Error::PersistenceUnavailable(_)));
    assert!(store.is_authenticated());
    assert_eq!(store.token().as_deref(), Some("t1"));

    let err = store.logout().unwrap_err();
    assert!(matches!(err, Error::PersistenceUnavailable(_)));
    assert!(!store.is_authenticated());
}

#[test]
fn test_failed_token_write_leaves_no_partial_session() {
    let storage = TokenRejectingStorage::default();
    storage.inner.set_item(TOKEN_KEY, "old-token").unwrap();
    let store = SessionStore::load(Arc::new(storage.clone()));

    let err = store.login(user("u2", "recruiter"), "t2").unwrap_err();
    assert!(matches!(err, Error::PersistenceUnavailable(_)));
    assert!(store.is_authenticated());

    assert_eq!(storage.get_item(USER_KEY).unwrap(), None);
    assert_eq!(storage.get_item(TOKEN_KEY).unwrap(), None);
    let reloaded = SessionStore::load(Arc::new(storage));
    assert!(!reloaded.is_authenticated());
    assert_eq!(reloaded.user(), None);
}

#[test]
fn test_clones_observe_updates_immediately() {
    let store = SessionStore::load(Arc::new(MemoryStorage::new()));
    let reader = store.clone();

    store.login(user("u1", "talent"), "t1").unwrap();
    assert!(reader.is_authenticated());

    store.logout().unwrap();
    assert!(!reader.is_authenticated());
}

#[test]
fn test_stale_until_sync() {
    let storage = Arc::new(MemoryStorage::new());
    let tab_a = SessionStore::load(storage.clone());
    let tab_b = SessionStore::load(storage.clone());

    tab_a.login(user("u1", "talent"), "t1").unwrap();
    assert!(!tab_b.is_authenticated());

    tab_b.sync();
    assert!(tab_b.is_authenticated());
    assert_eq!(tab_b.user(), tab_a.user());

    tab_a.logout().unwrap();
    assert!(tab_b.is_authenticated());
    tab_b.sync();
    assert!(!tab_b.is_authenticated());
}

#[tokio::test]
async fn test_subscriber_notified_on_sync() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::load(storage.clone());
    let mut changes = store.subscribe();

    storage.set_item(TOKEN_KEY, "from-another-tab").unwrap();
    store.sync();

    changes.changed().await.unwrap();
    assert_eq!(changes.borrow().token(), Some("from-another-tab"));
}
