//! Authentication session state and its durable store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::storage::{SessionStorage, StorageError};
use crate::error::{Error, Result};
use crate::types::UserProfile;

/// Storage key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";
/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// The client's record of who is logged in.
///
/// `is_authenticated` is derived from the token, so it can never disagree
/// with it. Empty tokens are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<UserProfile>,
    token: Option<String>,
}

impl Session {
    /// The anonymous session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    fn new(user: Option<UserProfile>, token: Option<String>) -> Self {
        Self {
            user,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    /// Current user profile, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Role of the current user, if any.
    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.role.as_deref())
    }

    /// Whether the current user carries the admin role.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(UserProfile::is_admin)
    }
}

/// Shared, durable session store.
///
/// Cloning is cheap and every clone observes the same state. State is only
/// mutated through [`login`](Self::login), [`logout`](Self::logout) and
/// [`sync`](Self::sync); readers get snapshots or a change subscription.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    state: watch::Sender<Session>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Create a store and populate it from `storage`.
    ///
    /// Never fails: unreadable storage or a malformed persisted user are
    /// treated as absent.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let session = read_persisted(storage.as_ref());
        debug!(
            name: "session.loaded",
            authenticated = session.is_authenticated(),
            "Session loaded from storage"
        );
        let (state, _) = watch::channel(session);
        Self {
            inner: Arc::new(SessionStoreInner { state, storage }),
        }
    }

    /// Current session snapshot.
    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    /// Current bearer token.
    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token.clone()
    }

    /// Current user profile.
    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user.clone()
    }

    /// Current user role.
    pub fn role(&self) -> Option<String> {
        self.inner.state.borrow().role().map(str::to_string)
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Subscribe to session changes.
    ///
    /// The receiver is marked changed after every `login`, `logout` and
    /// `sync`, even when the resulting value is identical.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Authenticate as `user` with `token`.
    ///
    /// The new state is visible to every reader before this returns. If it
    /// cannot be persisted the in-memory session stays authenticated and
    /// [`Error::PersistenceUnavailable`] is returned.
    pub fn login(&self, user: UserProfile, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::InvalidInput("login token must not be empty".into()));
        }
        let user_json = serde_json::to_string(&user)
            .map_err(|e| Error::PersistenceUnavailable(StorageError::Corrupt(e)))?;

        self.inner
            .state
            .send_replace(Session::new(Some(user), Some(token.clone())));
        info!(name: "session.login", "Session authenticated");

        let storage = self.inner.storage.as_ref();
        let persisted = storage
            .set_item(USER_KEY, &user_json)
            .and_then(|()| storage.set_item(TOKEN_KEY, &token));
        if let Err(e) = persisted {
            // A half-written pair must not load as a session later.
            if let Err(cleanup) = clear_persisted(storage) {
                warn!(
                    name: "session.persist.cleanup_failed",
                    error = %cleanup,
                    "Stale session keys left in storage"
                );
            }
            return Err(persist_failed(e));
        }
        Ok(())
    }

    /// Reset to anonymous and clear persisted session data.
    ///
    /// Idempotent. A storage failure is returned after the in-memory reset.
    pub fn logout(&self) -> Result<()> {
        let previous = self.inner.state.send_replace(Session::anonymous());
        if previous.is_authenticated() {
            info!(name: "session.logout", "Session cleared");
        }

        clear_persisted(self.inner.storage.as_ref()).map_err(persist_failed)
    }

    /// Overwrite in-memory state with whatever storage currently holds.
    ///
    /// Used to pick up changes made by another process sharing the storage.
    pub fn sync(&self) {
        let session = read_persisted(self.inner.storage.as_ref());
        debug!(
            name: "session.sync",
            authenticated = session.is_authenticated(),
            "Session synchronized with storage"
        );
        self.inner.state.send_replace(session);
    }
}

/// Token goes first: a leftover user without a token still loads anonymous.
fn clear_persisted(storage: &dyn SessionStorage) -> std::result::Result<(), StorageError> {
    storage
        .remove_item(TOKEN_KEY)
        .and_then(|()| storage.remove_item(USER_KEY))
}

fn persist_failed(e: StorageError) -> Error {
    warn!(name: "session.persist.failed", error = %e, "Session change kept in memory only");
    Error::PersistenceUnavailable(e)
}

fn read_persisted(storage: &dyn SessionStorage) -> Session {
    let token = match storage.get_item(TOKEN_KEY) {
        Ok(token) => token,
        Err(e) => {
            warn!(name: "session.storage.unreadable", error = %e, "Treating session as anonymous");
            return Session::anonymous();
        }
    };
    let user = match storage.get_item(USER_KEY) {
        Ok(Some(raw)) => parse_user(&raw),
        Ok(None) => None,
        Err(e) => {
            warn!(name: "session.storage.unreadable", error = %e, "Ignoring persisted user");
            None
        }
    };
    Session::new(user, token)
}

/// `null` and malformed JSON both read as no user.
fn parse_user(raw: &str) -> Option<UserProfile> {
    match serde_json::from_str::<Option<UserProfile>>(raw) {
        Ok(user) => user,
        Err(e) => {
            warn!(name: "session.user.malformed", error = %e, "Ignoring malformed persisted user");
            None
        }
    }
}
