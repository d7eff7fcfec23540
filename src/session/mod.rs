//! Authentication session management.
//!
//! This module tracks who is logged in across restarts. The session lives in
//! a shared [`SessionStore`] handle that is passed explicitly to whatever
//! needs it (the API client, the route guard); persistence goes through an
//! injected [`SessionStorage`] capability.
//!
//! # Architecture
//!
//! - [`Session`]: Read-only snapshot of the current identity and token
//! - [`SessionStore`]: Shared store with `login` / `logout` / `sync`
//! - [`SessionStorage`]: Synchronous key-value backend ([`MemoryStorage`], [`FileStorage`])
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use talentboard::session::{MemoryStorage, SessionStore};
//! use talentboard::types::UserProfile;
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let store = SessionStore::load(storage.clone());
//! store.login(UserProfile::default(), "token-123").unwrap();
//!
//! // A fresh store over the same storage sees the same session.
//! let reloaded = SessionStore::load(storage);
//! assert!(reloaded.is_authenticated());
//! ```

mod storage;
mod store;

pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};
pub use store::{Session, SessionStore, TOKEN_KEY, USER_KEY};
