//! Durable key/value storage for credentials and cached user attributes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser backs this with `localStorage`, the CLI with a JSON file, and
//! tests with [`MemoryStore`]. Everything above this layer goes through the
//! typed [`CredentialVault`] rather than touching raw keys.

pub mod file;
pub mod record;


use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

pub use file::FileStore;
pub use record::{CredentialVault, PersistedCredentials, RECORD_VERSION};

/// Storage keys recognized by the client.
pub mod keys {
    /// Consolidated, versioned credential record.
    pub const RECORD: &str = "helenite-credentials";

    pub const TOKEN: &str = "token";
    pub const EXPIRATION: &str = "expiration";
    pub const USER_FULLNAME: &str = "user-fullname";
    pub const USER_USERNAME: &str = "user-username";
    pub const USER_PFP: &str = "user-pfp";
    pub const PROFILE_SLUG: &str = "profile-slug";
    pub const FRIEND_REQUESTS: &str = "friend-requests";

    /// Per-field keys written by earlier client versions.
    pub const LEGACY: [&str; 7] =
        [TOKEN, EXPIRATION, USER_FULLNAME, USER_USERNAME, USER_PFP, PROFILE_SLUG, FRIEND_REQUESTS];
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write failed for `{key}`: {message}")]
    Write { key: String, message: String },
    #[error("credential record encode failed: {0}")]
    Encode(String),
    #[error("session lifetime {0:?} is out of range")]
    Lifetime(std::time::Duration),
}

/// String key/value storage that outlives a single page load.
pub trait CredentialStore {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local store used by tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every key currently present.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
