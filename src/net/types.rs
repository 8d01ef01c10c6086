//! Typed response schemas for the Helenite REST API.
//!
//! DESIGN
//! ======
//! Payloads are parsed here, at the API boundary, so pages and flows never
//! inspect raw JSON. Field names follow the server serializers; Rust-side
//! names are used where the server's are awkward (`get_full_name`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Last non-empty path segment of an API endpoint such as
/// `/api/v1/profile/post/ab12c/`.
#[must_use]
pub fn last_segment(endpoint: &str) -> &str {
    endpoint.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Compact profile shape shared by feed authors, search hits, and friends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
    #[serde(default)]
    pub user_pk: Option<String>,
    pub username: String,
    #[serde(rename = "get_full_name", default)]
    pub full_name: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub pfp: Option<String>,
}

impl ProfileSummary {
    /// Profile path slug; falls back to the username when no endpoint is set.
    #[must_use]
    pub fn slug(&self) -> &str {
        match last_segment(&self.endpoint) {
            "" => &self.username,
            slug => slug,
        }
    }
}

/// A post as listed in a feed or embedded in a profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Absent when the post is nested inside its author's profile.
    #[serde(default)]
    pub profile: Option<ProfileSummary>,
    pub post_publication_date: String,
    pub endpoint: String,
    #[serde(default)]
    pub post_text: String,
    #[serde(default)]
    pub post_image: Option<String>,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    /// Usernames of everyone who liked the post.
    #[serde(default)]
    pub likes: BTreeSet<String>,
}

impl Post {
    /// Identifier used by the like endpoint and the `/post/:postId` route.
    #[must_use]
    pub fn slug(&self) -> &str {
        last_segment(&self.endpoint)
    }

    #[must_use]
    pub fn liked_by(&self, username: &str) -> bool {
        self.likes.contains(username)
    }
}

/// Feed and discover payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<Post>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(alias = "text")]
    pub comment_text: String,
    #[serde(alias = "author")]
    pub comment_user: String,
}

/// Single post with its comment thread.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub username: String,
}

/// Incoming friend request as nested in the profile payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRequest {
    #[serde(default)]
    pub request_id: Option<String>,
    pub request_made_by: UserRef,
    #[serde(default)]
    pub accepted: bool,
}

/// Full profile page payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetail {
    #[serde(flatten)]
    pub summary: ProfileSummary,
    /// `None` when the owner hides it.
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub birth_place: Option<String>,
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub friend_requests: Vec<FriendRequest>,
}

impl ProfileDetail {
    /// Usernames behind requests that have not been accepted yet.
    #[must_use]
    pub fn pending_request_usernames(&self) -> BTreeSet<String> {
        self.friend_requests
            .iter()
            .filter(|r| !r.accepted)
            .map(|r| r.request_made_by.username.clone())
            .collect()
    }
}

/// The caller's own editable settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    #[serde(default)]
    pub pfp: Option<String>,
    #[serde(default)]
    pub private_profile: bool,
    #[serde(default)]
    pub show_birthday: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsEntry {
    #[serde(default)]
    pub friends: Vec<ProfileSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsPage {
    #[serde(default)]
    pub results: Vec<FriendsEntry>,
}

impl FriendsPage {
    /// The server wraps the friend list in a one-element result set.
    #[must_use]
    pub fn into_friends(self) -> Vec<ProfileSummary> {
        self.results.into_iter().next().map(|e| e.friends).unwrap_or_default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRequest {
    pub post_slug: String,
}

/// Free-form server message on friend-request and error responses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ServerMessage {
    /// First populated field, in `message`, `error`, `detail` order.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .or(self.detail.as_deref())
            .filter(|s| !s.is_empty())
    }
}
