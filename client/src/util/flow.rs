//! Applying mutation results to the UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every page handles a finished flow the same way: write the session
//! snapshot back, show the notice, then reload or navigate. Validation errors
//! stay on the page so the form can highlight the field.

#[cfg(test)]
#[path = "flow_test.rs"]
mod flow_test;

use std::time::Duration;

use helenite::mutation::{MutationError, MutationOutcome, Navigation};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::app::{AppContext, AppSession};

/// Inline error for one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineError {
    pub field: &'static str,
    pub message: String,
}

/// What the page does after a flow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Nothing,
    Reload,
    Go(String),
    GoAfter { path: String, delay_ms: u32 },
}

pub fn plan(navigation: &Navigation) -> Step {
    match navigation {
        Navigation::Stay => Step::Nothing,
        Navigation::Reload => Step::Reload,
        Navigation::To(route) => Step::Go(route.path()),
        Navigation::ToAfter { route, delay } => Step::GoAfter { path: route.path(), delay_ms: delay_ms(*delay) },
    }
}

fn delay_ms(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

/// Split a flow error into an inline field error or a toast.
pub fn inline_error(err: &MutationError) -> Option<InlineError> {
    err.field().map(|field| InlineError { field, message: err.notice().message })
}

/// Store the session, then apply `result`. Returns the inline error, if any.
pub fn finish<N>(
    app: AppContext,
    session: AppSession,
    result: Result<MutationOutcome, MutationError>,
    navigate: N,
) -> Option<InlineError>
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    app.session.set(session);
    match result {
        Ok(outcome) => {
            apply(app, outcome, navigate);
            None
        }
        Err(err) => {
            let inline = inline_error(&err);
            if inline.is_none() {
                app.notify(err.notice());
            }
            inline
        }
    }
}

pub fn apply<N>(app: AppContext, outcome: MutationOutcome, navigate: N)
where
    N: Fn(&str, NavigateOptions) + Clone + 'static,
{
    if let Some(notice) = outcome.notice {
        app.notify(notice);
    }
    match plan(&outcome.navigation) {
        Step::Nothing => {}
        Step::Reload => app.request_reload(),
        Step::Go(path) => navigate(&path, NavigateOptions::default()),
        Step::GoAfter { path, delay_ms } => {
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(delay_ms).await;
                navigate(&path, NavigateOptions::default());
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (path, delay_ms, navigate);
            }
        }
    }
}
