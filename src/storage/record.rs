//! Typed accessor over the consolidated credential record.
//!
//! DESIGN
//! ======
//! Token, expiry, and the cached profile summary are written as a single
//! versioned JSON record under [`keys::RECORD`], so a reader never observes a
//! token without its profile. Stores populated by older clients still carry
//! seven independent keys; reads fall back to those, and [`CredentialVault::save`]
//! and [`CredentialVault::erase`] remove them.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};

use super::{CredentialStore, StorageError, keys};
use crate::profile::UserProfileSummary;

pub const RECORD_VERSION: u32 = 1;

/// Everything a successful login leaves behind on the device.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedCredentials {
    pub version: u32,
    pub token: String,
    /// RFC 3339 timestamp.
    pub expiration: String,
    pub profile: UserProfileSummary,
}

impl PersistedCredentials {
    #[must_use]
    pub fn new(token: String, expiration: String, profile: UserProfileSummary) -> Self {
        Self { version: RECORD_VERSION, token, expiration, profile }
    }
}

/// Typed view over a [`CredentialStore`].
#[derive(Clone, Debug, Default)]
pub struct CredentialVault<S> {
    store: S,
}

impl<S: CredentialStore> CredentialVault<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The full record, if one was written by this client version.
    pub fn record(&self) -> Option<PersistedCredentials> {
        let raw = self.store.get(keys::RECORD)?;
        match serde_json::from_str::<PersistedCredentials>(&raw) {
            Ok(record) if record.version == RECORD_VERSION => Some(record),
            Ok(record) => {
                tracing::warn!(version = record.version, "ignoring credential record with unknown version");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable credential record");
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        match self.record() {
            Some(record) => Some(record.token),
            None => self.store.get(keys::TOKEN),
        }
    }

    pub fn expiration(&self) -> Option<String> {
        match self.record() {
            Some(record) => Some(record.expiration),
            None => self.store.get(keys::EXPIRATION),
        }
    }

    /// Cached profile summary; empty when nothing was persisted.
    pub fn profile(&self) -> UserProfileSummary {
        if let Some(record) = self.record() {
            return record.profile;
        }
        let friend_requests = self
            .store
            .get(keys::FRIEND_REQUESTS)
            .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
            .unwrap_or_default();
        UserProfileSummary {
            full_name: self.store.get(keys::USER_FULLNAME).unwrap_or_default(),
            username: self.store.get(keys::USER_USERNAME).unwrap_or_default(),
            avatar_url: self.store.get(keys::USER_PFP).unwrap_or_default(),
            profile_slug: self.store.get(keys::PROFILE_SLUG).unwrap_or_default(),
            pending_friend_requests: friend_requests.into_iter().collect(),
        }
    }

    /// Write the whole record in one store operation.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if encoding or the backend write fails.
    pub fn save(&self, record: &PersistedCredentials) -> Result<(), StorageError> {
        let raw = serde_json::to_string(record).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.set(keys::RECORD, &raw)?;
        for key in keys::LEGACY {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Remove the record and every legacy key. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects a removal.
    pub fn erase(&self) -> Result<(), StorageError> {
        self.store.remove(keys::RECORD)?;
        for key in keys::LEGACY {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
