//! Injected session context shared by the route guard, loaders, and flows.
//!
//! DESIGN
//! ======
//! One value owns the credential vault, the session store, and the profile
//! cache. Presentation code receives it explicitly instead of reaching for
//! module-level state. The only ways to change session state are
//! [`SessionContext::refresh`], [`SessionContext::establish`] (login), and
//! [`SessionContext::sign_out`].

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::clock::{Clock, SystemClock};
use crate::config::ClientConfig;
use crate::guard::{self, GuardDecision};
use crate::profile::{UserProfileCache, UserProfileSummary};
use crate::routes::Route;
use crate::session::SessionStore;
use crate::storage::{CredentialStore, CredentialVault, PersistedCredentials, StorageError};

/// What a successful login hands to the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginGrant {
    pub token: String,
    pub expiration: OffsetDateTime,
    pub profile: UserProfileSummary,
}

#[derive(Clone)]
pub struct SessionContext<S> {
    vault: CredentialVault<S>,
    session: SessionStore,
    profile: UserProfileCache,
    clock: Arc<dyn Clock>,
    config: ClientConfig,
}

impl<S: CredentialStore> SessionContext<S> {
    /// Build a context over `store` and load whatever it already holds.
    pub fn new(store: S, config: ClientConfig) -> Self {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, config: ClientConfig, clock: Arc<dyn Clock>) -> Self {
        let mut ctx = Self {
            vault: CredentialVault::new(store),
            session: SessionStore::new(config.expiry_policy),
            profile: UserProfileCache::default(),
            clock,
            config,
        };
        ctx.refresh();
        ctx
    }

    /// Re-read the vault into the session store and profile cache.
    pub fn refresh(&mut self) {
        let now = self.clock.now();
        self.session.refresh(&self.vault, now);
        self.profile.load(&self.vault);
    }

    /// Refresh, then decide whether `route` may render.
    pub fn guard(&mut self, route: &Route) -> GuardDecision {
        self.refresh();
        guard::evaluate(route, self.session.is_logged_in())
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub fn profile(&self) -> &UserProfileSummary {
        self.profile.summary()
    }

    pub fn profile_cache(&self) -> &UserProfileCache {
        &self.profile
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn vault(&self) -> &CredentialVault<S> {
        &self.vault
    }

    pub fn store(&self) -> &S {
        self.vault.store()
    }

    #[must_use]
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Token for the next request, read from storage rather than memory so a
    /// login in another tab is picked up.
    pub fn bearer_token(&self) -> Option<String> {
        self.vault.token().filter(|t| !t.is_empty())
    }

    /// Expiry stamped onto a login completed now.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Lifetime`] when the configured lifetime does
    /// not fit in a timestamp.
    pub fn fresh_expiry(&self) -> Result<OffsetDateTime, StorageError> {
        let ttl = self.config.session_ttl;
        time::Duration::try_from(ttl)
            .ok()
            .and_then(|ttl| self.clock.now().checked_add(ttl))
            .ok_or(StorageError::Lifetime(ttl))
    }

    /// Persist a completed login and load it into memory.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the record cannot be encoded or written.
    pub fn establish(&mut self, grant: LoginGrant) -> Result<(), StorageError> {
        let expiration = grant
            .expiration
            .format(&Rfc3339)
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        let username = grant.profile.username.clone();
        self.vault
            .save(&PersistedCredentials::new(grant.token, expiration, grant.profile))?;
        self.refresh();
        tracing::info!(%username, "session established");
        Ok(())
    }

    /// Clear the session store and the profile cache, in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] raised; both stores are cleared in
    /// memory regardless.
    pub fn sign_out(&mut self) -> Result<(), StorageError> {
        let session = self.session.logout(&self.vault);
        let profile = self.profile.clear(&self.vault);
        tracing::info!("session cleared");
        session.and(profile)
    }
}
