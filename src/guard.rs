//! Route guard: decides whether a route renders or redirects.
//!
//! The guard performs no I/O and cannot fail. Callers refresh the session
//! first; see [`crate::context::SessionContext::guard`].

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::routes::{Access, Route};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the route.
    Open,
    /// Render a redirect instead; nothing below the guard runs.
    Redirect(Route),
}

/// Branch on the session flag for `route`.
#[must_use]
pub fn evaluate(route: &Route, is_logged_in: bool) -> GuardDecision {
    let decision = match (route.access(), is_logged_in) {
        (Access::Gated, false) => GuardDecision::Redirect(Route::Login),
        (Access::PublicOnly, true) => GuardDecision::Redirect(Route::Feed),
        _ => GuardDecision::Open,
    };
    tracing::debug!(route = %route, logged_in = is_logged_in, ?decision, "route guard");
    decision
}
