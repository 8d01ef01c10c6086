//! Per-route data loaders.
//!
//! SYSTEM CONTEXT
//! ==============
//! A loader runs before its page renders and fetches everything the page
//! shows, fresh on every entry. Every loader returns
//! `Result<T, LoaderError>`; how a failure renders is decided per page by
//! [`FailurePolicy`], not by the loader.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use crate::net::ApiError;
use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::{FeedPage, PostDetail, ProfileDetail, ProfileSummary, SettingsView};
use crate::routes::Route;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// No bearer token was stored, or the server rejected it with 401.
    #[error("not signed in")]
    Unauthenticated,

    #[error("{message}")]
    Request { status: Option<u16>, message: String },

    /// The navigation that started the load went away.
    #[error("load cancelled")]
    Cancelled,
}

impl LoaderError {
    /// HTTP-style status for the error page.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated => Some(401),
            Self::Request { status, .. } => *status,
            Self::Cancelled => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated => "You need to log in to see this page.",
            Self::Request { message, .. } => message,
            Self::Cancelled => "Request cancelled.",
        }
    }
}

impl From<ApiError> for LoaderError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Cancelled => Self::Cancelled,
            ApiError::MissingToken | ApiError::Status { status: 401, .. } => Self::Unauthenticated,
            ApiError::Status { status, message } => Self::Request { status: Some(status), message },
            ApiError::Transport(message) => Self::Request {
                status: None,
                message: format!("Could not reach the server: {message}"),
            },
            ApiError::Decode(message) => Self::Request {
                status: None,
                message: format!("The server sent an unexpected response: {message}"),
            },
        }
    }
}

/// How a page renders a failed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Replace the page with the application error page.
    ErrorPage,
    /// Render the page with no data ("nothing here", "no permission").
    EmptyState,
}

impl FailurePolicy {
    #[must_use]
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Feed | Route::Discover | Route::Post { .. } => Self::ErrorPage,
            _ => Self::EmptyState,
        }
    }
}

fn require(token: Option<&str>) -> Result<&str, LoaderError> {
    token.filter(|t| !t.is_empty()).ok_or(LoaderError::Unauthenticated)
}

/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn feed<T: HttpTransport>(api: &ApiClient<T>, token: Option<&str>) -> Result<FeedPage, LoaderError> {
    let token = require(token)?;
    Ok(api.feed(token).await?)
}

/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn discover<T: HttpTransport>(api: &ApiClient<T>, token: Option<&str>) -> Result<FeedPage, LoaderError> {
    let token = require(token)?;
    Ok(api.discover(token).await?)
}

/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn profile<T: HttpTransport>(
    api: &ApiClient<T>,
    token: Option<&str>,
    username: &str,
) -> Result<ProfileDetail, LoaderError> {
    let token = require(token)?;
    Ok(api.profile(token, username).await?)
}

/// 403 means the caller does not own the profile.
///
/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn settings<T: HttpTransport>(
    api: &ApiClient<T>,
    token: Option<&str>,
    username: &str,
) -> Result<SettingsView, LoaderError> {
    let token = require(token)?;
    Ok(api.settings(token, username).await?)
}

/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn friends<T: HttpTransport>(
    api: &ApiClient<T>,
    token: Option<&str>,
    username: &str,
) -> Result<Vec<ProfileSummary>, LoaderError> {
    let token = require(token)?;
    Ok(api.friends(token, username).await?)
}

/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn post<T: HttpTransport>(
    api: &ApiClient<T>,
    token: Option<&str>,
    post_id: &str,
) -> Result<PostDetail, LoaderError> {
    let token = require(token)?;
    Ok(api.post(token, post_id).await?)
}

/// A blank query resolves to no results without a request.
///
/// # Errors
///
/// Returns a [`LoaderError`] when unauthenticated or the request fails.
pub async fn search<T: HttpTransport>(
    api: &ApiClient<T>,
    token: Option<&str>,
    query: &str,
) -> Result<Vec<ProfileSummary>, LoaderError> {
    let token = require(token)?;
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(api.search(token, query).await?)
}
