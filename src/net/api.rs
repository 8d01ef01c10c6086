//! REST client for the Helenite API.
//!
//! Each method resolves one endpoint under `/api/v1`, attaches the bearer
//! token it is given, and parses the response into a typed payload.
//!
//! ERROR HANDLING
//! ==============
//! Non-success statuses become [`ApiError::Status`] carrying the server's
//! message; callers decide whether that is an error page, an empty state, or
//! a notice. The only status-specific rule here is search's `204 No Content`,
//! which means "no matches".

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::ApiError;
use super::transport::{ApiRequest, ApiResponse, FormPart, HttpTransport, Method, RequestBody};
use super::types::{
    FeedPage, FriendsPage, LikeRequest, LoginRequest, LoginResponse, PostDetail, ProfileDetail, ProfileSummary,
    ServerMessage, SettingsView,
};

pub const API_PREFIX: &str = "/api/v1";

/// Search accepts at most this many whitespace-separated terms.
pub const MAX_SEARCH_TERMS: usize = 2;

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn profile_path(username: &str) -> String {
    format!("/profile/{}/", segment(username))
}

fn friends_path(username: &str) -> String {
    format!("/profile/{}/friends/", segment(username))
}

fn settings_path(username: &str) -> String {
    format!("/profile/{}/change-settings/", segment(username))
}

fn post_path(post_id: &str) -> String {
    format!("/profile/post/{}/", segment(post_id))
}

/// `?q=` value for a free-text search: the first two terms joined by `+`.
#[must_use]
pub fn search_query_value(query: &str) -> String {
    query
        .split_whitespace()
        .take(MAX_SEARCH_TERMS)
        .map(|term| urlencoding::encode(term).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

/// Typed API client over an injected transport.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
    origin: String,
}

impl<T: HttpTransport> ApiClient<T> {
    /// `origin` is the backend root, e.g. `http://localhost:8000`.
    pub fn new(transport: T, origin: &str) -> Self {
        Self { transport, origin: origin.trim_end_matches('/').to_owned() }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Absolute URL for a path below the API prefix.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.origin)
    }

    /// Absolute URL for an `endpoint` value returned by the server, which is
    /// already rooted at the origin (`/api/v1/profile/post/ab12c/`).
    #[must_use]
    pub fn endpoint_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            endpoint.to_owned()
        } else {
            format!("{}/{}", self.origin, endpoint.trim_start_matches('/'))
        }
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        bearer: Option<&str>,
        body: RequestBody,
    ) -> Result<ApiResponse, ApiError> {
        tracing::debug!(%method, %url, authenticated = bearer.is_some(), "api request");
        let request = ApiRequest { method, url, bearer: bearer.map(str::to_owned), body };
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            tracing::warn!(%method, status = response.status, "api request failed");
        }
        Ok(response)
    }

    async fn send_ok(
        &self,
        method: Method,
        url: String,
        bearer: Option<&str>,
        body: RequestBody,
    ) -> Result<ApiResponse, ApiError> {
        let response = self.send(method, url, bearer, body).await?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response))
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str, token: &str) -> Result<R, ApiError> {
        self.send_ok(Method::Get, self.api_url(path), Some(token), RequestBody::Empty)
            .await?
            .json()
    }

    /// `POST /login/` with JSON credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for rejected credentials.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(credentials).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send_ok(Method::Post, self.api_url("/login/"), None, RequestBody::Json(body))
            .await?
            .json()
    }

    /// `POST /logout/`. Returns the raw response; logout proceeds either way.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received.
    pub async fn logout(&self, token: Option<&str>) -> Result<ApiResponse, ApiError> {
        self.send(Method::Post, self.api_url("/logout/"), token, RequestBody::Empty)
            .await
    }

    /// `POST /register/` with multipart profile fields.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] when the server rejects the registration.
    pub async fn register(&self, parts: Vec<FormPart>) -> Result<(), ApiError> {
        self.send_ok(Method::Post, self.api_url("/register/"), None, RequestBody::Multipart(parts))
            .await
            .map(|_| ())
    }

    /// `GET /feed/`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn feed(&self, token: &str) -> Result<FeedPage, ApiError> {
        self.get_json("/feed/", token).await
    }

    /// `GET /feed/discover/`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn discover(&self, token: &str) -> Result<FeedPage, ApiError> {
        self.get_json("/feed/discover/", token).await
    }

    /// `POST /feed/` with `post_text` and/or `post_image`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or status failure.
    pub async fn create_post(&self, token: &str, parts: Vec<FormPart>) -> Result<(), ApiError> {
        self.send_ok(Method::Post, self.api_url("/feed/"), Some(token), RequestBody::Multipart(parts))
            .await
            .map(|_| ())
    }

    /// `PUT /feed/` toggling the caller's like on a post. Returns the raw
    /// response so lenient callers can ignore the status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received.
    pub async fn toggle_like(&self, token: &str, post_slug: &str) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(LikeRequest { post_slug: post_slug.to_owned() })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::Put, self.api_url("/feed/"), Some(token), RequestBody::Json(body))
            .await
    }

    /// `GET /profile/{username}/`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn profile(&self, token: &str, username: &str) -> Result<ProfileDetail, ApiError> {
        self.get_json(&profile_path(username), token).await
    }

    /// `GET /profile/{username}/friends/`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn friends(&self, token: &str, username: &str) -> Result<Vec<ProfileSummary>, ApiError> {
        self.get_json::<FriendsPage>(&friends_path(username), token)
            .await
            .map(FriendsPage::into_friends)
    }

    /// `GET /profile/{username}/change-settings/`; 403 when not the owner.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn settings(&self, token: &str, username: &str) -> Result<SettingsView, ApiError> {
        self.get_json(&settings_path(username), token).await
    }

    /// `PATCH /profile/{username}/change-settings/` with only the touched fields.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or status failure.
    pub async fn update_settings(&self, token: &str, username: &str, parts: Vec<FormPart>) -> Result<(), ApiError> {
        self.send_ok(
            Method::Patch,
            self.api_url(&settings_path(username)),
            Some(token),
            RequestBody::Multipart(parts),
        )
        .await
        .map(|_| ())
    }

    /// `GET /profile/post/{post_id}/` with comments.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn post(&self, token: &str, post_id: &str) -> Result<PostDetail, ApiError> {
        self.get_json(&post_path(post_id), token).await
    }

    /// `POST {endpoint}` adding a comment to a post. Returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when no response was received.
    pub async fn comment(&self, token: &str, endpoint: &str, parts: Vec<FormPart>) -> Result<ApiResponse, ApiError> {
        self.send(Method::Post, self.endpoint_url(endpoint), Some(token), RequestBody::Multipart(parts))
            .await
    }

    /// `DELETE {endpoint}` removing a post.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport or status failure.
    pub async fn delete_post(&self, token: &str, endpoint: &str) -> Result<(), ApiError> {
        self.send_ok(Method::Delete, self.endpoint_url(endpoint), Some(token), RequestBody::Empty)
            .await
            .map(|_| ())
    }

    /// `GET /search/?q=`; `204 No Content` means no matches.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport, status, or decode failure.
    pub async fn search(&self, token: &str, query: &str) -> Result<Vec<ProfileSummary>, ApiError> {
        let url = format!("{}?q={}", self.api_url("/search/"), search_query_value(query));
        let response = self.send_ok(Method::Get, url, Some(token), RequestBody::Empty).await?;
        if response.status == 204 || response.body.is_empty() {
            return Ok(Vec::new());
        }
        response.json()
    }

    /// `POST` (send) or `PUT` (accept) on `/profile/{username}/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] carrying the server's message when refused.
    pub async fn friend_request(&self, token: &str, username: &str, method: Method) -> Result<ServerMessage, ApiError> {
        let response = self
            .send_ok(method, self.api_url(&profile_path(username)), Some(token), RequestBody::Empty)
            .await?;
        Ok(response.json::<ServerMessage>().unwrap_or_default())
    }
}
