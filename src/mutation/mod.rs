//! Mutation flows: validate, write to the server, resynchronize.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every flow follows the same sequence: client-side validation, one or more
//! authenticated requests, a local state update, then a [`Navigation`] telling
//! the caller what to render next. Local state is only written after the
//! request it depends on has succeeded.
//!
//! ERROR HANDLING
//! ==============
//! Flows return [`MutationError`]. Validation errors are shown inline next to
//! their field; everything else becomes a transient [`Notice`] via
//! [`MutationError::notice`]. Nothing is retried.

pub mod auth;
pub mod friends;
pub mod post;
pub mod settings;

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

use std::time::Duration;

use crate::net::ApiError;
use crate::routes::Route;
use crate::storage::StorageError;
use crate::validation::FieldError;

/// What the caller should render after a flow completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Keep the current page as is.
    Stay,
    /// Re-run the current route's loader and re-render.
    Reload,
    To(Route),
    /// Navigate after waiting out `delay`.
    ToAfter { route: Route, delay: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient, dismissible notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationOutcome {
    pub navigation: Navigation,
    pub notice: Option<Notice>,
}

impl MutationOutcome {
    #[must_use]
    pub fn reload() -> Self {
        Self { navigation: Navigation::Reload, notice: None }
    }

    #[must_use]
    pub fn to(route: Route) -> Self {
        Self { navigation: Navigation::To(route), notice: None }
    }

    #[must_use]
    pub fn stay(notice: Notice) -> Self {
        Self { navigation: Navigation::Stay, notice: Some(notice) }
    }

    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// A field failed client-side validation; nothing was sent.
    #[error(transparent)]
    Invalid(#[from] FieldError),

    /// The server refused the credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The form had no changes to submit.
    #[error("nothing to submit")]
    NothingToSubmit,

    /// No stored token for an authenticated write.
    #[error("not signed in")]
    Unauthenticated,

    /// The signed-in user may not perform this action.
    #[error("{0}")]
    Forbidden(&'static str),

    /// A write request failed; `message` is what the user sees.
    #[error("{message}")]
    Request {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MutationError {
    pub(crate) fn request(message: impl Into<String>, source: ApiError) -> Self {
        Self::Request { message: message.into(), source }
    }

    /// User-facing notification for this failure.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Invalid(field) => Notice::error(field.message.clone()),
            Self::Authentication(message) => Notice::error(message.clone()),
            Self::NothingToSubmit => Notice::info("There is nothing to submit."),
            Self::Unauthenticated => Notice::error("Your session has ended, please log in again."),
            Self::Forbidden(message) => Notice::error(*message),
            Self::Request { message, .. } => Notice::error(message.clone()),
            Self::Storage(_) => Notice::error("Could not save your session on this device."),
        }
    }

    /// The field to highlight, for validation failures.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Invalid(field) => Some(field.field),
            _ => None,
        }
    }
}

fn require_token(token: Option<String>) -> Result<String, MutationError> {
    token.filter(|t| !t.is_empty()).ok_or(MutationError::Unauthenticated)
}
