//! Session store: authentication flag, bearer token, and token expiry.
//!
//! The store is pull-based. Nothing pushes invalidations into it; callers
//! [`SessionStore::refresh`] it from the credential vault before every gating
//! decision.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::config::ExpiryPolicy;
use crate::storage::{CredentialStore, CredentialVault, StorageError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStore {
    is_logged_in: bool,
    token: Option<String>,
    expiration: Option<OffsetDateTime>,
    policy: ExpiryPolicy,
}

impl SessionStore {
    #[must_use]
    pub fn new(policy: ExpiryPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    /// Re-read token and expiry from the vault and recompute the login flag.
    ///
    /// An expiry that does not parse as RFC 3339 is treated as absent.
    pub fn refresh<S: CredentialStore>(&mut self, vault: &CredentialVault<S>, now: OffsetDateTime) {
        self.token = vault.token().filter(|t| !t.is_empty());
        self.expiration = vault.expiration().and_then(|raw| match OffsetDateTime::parse(&raw, &Rfc3339) {
            Ok(at) => Some(at),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unparsable session expiry");
                None
            }
        });

        let present = self.token.is_some() && self.expiration.is_some();
        self.is_logged_in = match self.policy {
            ExpiryPolicy::PresenceOnly => present,
            ExpiryPolicy::Enforce => present && self.expiration.is_some_and(|at| at > now),
        };
        tracing::debug!(logged_in = self.is_logged_in, policy = ?self.policy, "session refreshed");
    }

    /// Clear memory and erase the persisted record. Safe when already logged out.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend rejects the removal; memory is
    /// cleared regardless.
    pub fn logout<S: CredentialStore>(&mut self, vault: &CredentialVault<S>) -> Result<(), StorageError> {
        self.is_logged_in = false;
        self.token = None;
        self.expiration = None;
        vault.erase()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn expiration(&self) -> Option<OffsetDateTime> {
        self.expiration
    }

    #[must_use]
    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    /// True when an expiry is stored and has elapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expiration.is_some_and(|at| at <= now)
    }
}
