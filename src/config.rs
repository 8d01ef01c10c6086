//! Client configuration parsed from environment-style key lookups.
//!
//! Native binaries read the process environment through
//! [`ClientConfig::from_env`]; the browser build has no environment and passes
//! compile-time values through [`ClientConfig::from_lookup`].

use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;
/// Longest accepted session lifetime (one year).
pub const MAX_SESSION_TTL_SECS: u64 = 365 * 24 * 60 * 60;
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 2000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown HELENITE_EXPIRY_POLICY: {0} (expected 'presence' or 'enforce')")]
    ExpiryPolicy(String),
    #[error("invalid HELENITE_STRICT_STATUS: {0} (expected 'true' or 'false')")]
    StrictStatus(String),
}

/// How the session store treats a persisted expiry timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// A session is valid when both token and expiry are present, regardless
    /// of whether the expiry has elapsed. The server enforces real expiry.
    #[default]
    PresenceOnly,
    /// A session is valid only while the expiry lies in the future.
    Enforce,
}

/// Whether write flows treat a non-success response as a failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusStrictness {
    /// Non-success responses surface a notice and skip the reload.
    #[default]
    Strict,
    /// Like and comment flows reload even when the server rejected the write.
    Lenient,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin without trailing slash, e.g. `http://localhost:8000`.
    pub api_url: String,
    pub expiry_policy: ExpiryPolicy,
    pub strictness: StatusStrictness,
    /// Lifetime stamped onto a fresh login.
    pub session_ttl: Duration,
    /// Pause between a successful registration and the redirect to `/login`.
    pub register_redirect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            expiry_policy: ExpiryPolicy::PresenceOnly,
            strictness: StatusStrictness::Strict,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            register_redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_DELAY_MS),
        }
    }
}

impl ClientConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `HELENITE_API_URL`: backend origin (default `http://localhost:8000`)
    /// - `HELENITE_EXPIRY_POLICY`: `presence` (default) or `enforce`
    /// - `HELENITE_STRICT_STATUS`: `true` (default) or `false`
    /// - `HELENITE_SESSION_TTL_SECS`: default 3600, at most one year
    /// - `HELENITE_REDIRECT_DELAY_MS`: default 2000
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an enumerated value is not recognized.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when an enumerated value is not recognized.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("HELENITE_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
            .trim()
            .trim_end_matches('/')
            .to_owned();
        let expiry_policy = parse_expiry_policy(lookup("HELENITE_EXPIRY_POLICY").as_deref())?;
        let strictness = parse_strictness(lookup("HELENITE_STRICT_STATUS").as_deref())?;
        let session_ttl = match parse_u64(lookup("HELENITE_SESSION_TTL_SECS").as_deref(), DEFAULT_SESSION_TTL_SECS) {
            secs if secs > MAX_SESSION_TTL_SECS => DEFAULT_SESSION_TTL_SECS,
            secs => secs,
        };
        let session_ttl = Duration::from_secs(session_ttl);
        let register_redirect_delay = Duration::from_millis(parse_u64(
            lookup("HELENITE_REDIRECT_DELAY_MS").as_deref(),
            DEFAULT_REDIRECT_DELAY_MS,
        ));

        Ok(Self { api_url, expiry_policy, strictness, session_ttl, register_redirect_delay })
    }
}

fn parse_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

fn parse_expiry_policy(raw: Option<&str>) -> Result<ExpiryPolicy, ConfigError> {
    match raw.map(str::trim).unwrap_or("presence") {
        "presence" | "" => Ok(ExpiryPolicy::PresenceOnly),
        "enforce" => Ok(ExpiryPolicy::Enforce),
        other => Err(ConfigError::ExpiryPolicy(other.to_owned())),
    }
}

fn parse_strictness(raw: Option<&str>) -> Result<StatusStrictness, ConfigError> {
    match raw.map(str::trim).unwrap_or("true") {
        "true" | "1" | "" => Ok(StatusStrictness::Strict),
        "false" | "0" => Ok(StatusStrictness::Lenient),
        other => Err(ConfigError::StrictStatus(other.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
