//! Cached attributes of the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Filled only from the persisted credential record, which the login flow
//! writes after fetching the user's own profile. There is no independent
//! refresh path; a stale cache is corrected by the next login.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::net::types::ProfileDetail;
use crate::storage::{CredentialStore, CredentialVault, StorageError};

/// Display attributes of the signed-in user plus incoming friend requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileSummary {
    pub full_name: String,
    pub username: String,
    pub avatar_url: String,
    pub profile_slug: String,
    /// Usernames that have sent the user a still-pending friend request.
    #[serde(default)]
    pub pending_friend_requests: BTreeSet<String>,
}

impl UserProfileSummary {
    /// Flatten the user's own profile payload into the cached summary.
    #[must_use]
    pub fn from_profile(profile: &ProfileDetail) -> Self {
        Self {
            full_name: profile.summary.full_name.clone(),
            username: profile.summary.username.clone(),
            avatar_url: profile.summary.pfp.clone().unwrap_or_default(),
            profile_slug: profile.summary.slug().to_owned(),
            pending_friend_requests: profile.pending_request_usernames(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfileCache {
    summary: UserProfileSummary,
}

impl UserProfileCache {
    /// Mirror the persisted summary into memory.
    pub fn load<S: CredentialStore>(&mut self, vault: &CredentialVault<S>) {
        self.summary = vault.profile();
    }

    /// Drop the in-memory summary and erase the persisted record.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal; memory is
    /// cleared regardless.
    pub fn clear<S: CredentialStore>(&mut self, vault: &CredentialVault<S>) -> Result<(), StorageError> {
        self.summary = UserProfileSummary::default();
        vault.erase()
    }

    #[must_use]
    pub fn summary(&self) -> &UserProfileSummary {
        &self.summary
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.summary.username
    }

    #[must_use]
    pub fn has_pending_request_from(&self, username: &str) -> bool {
        self.summary.pending_friend_requests.contains(username)
    }
}
