//! Client-visible route table.
//!
//! Every path the front end renders is a [`Route`] variant. Parsing tolerates a
//! trailing slash; anything unrecognized becomes [`Route::NotFound`].

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;

/// Who may enter a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Reachable whether or not a session exists.
    Public,
    /// Signed-in visitors are sent to the feed instead.
    PublicOnly,
    /// Requires a valid session.
    Gated,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    AboutUs,
    Feed,
    Discover,
    Profile { username: String },
    Settings { username: String },
    Friends { username: String },
    Post { post_id: String },
    Search { query: String },
    NotFound { path: String },
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), |s| s.into_owned())
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode(value))
}

impl Route {
    /// Parse a path with optional query string, e.g. `/search?q=ada`.
    #[must_use]
    pub fn parse(path_and_query: &str) -> Self {
        let (path, query) = path_and_query.split_once('?').unwrap_or((path_and_query, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Landing,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["about-us"] => Self::AboutUs,
            ["feed"] => Self::Feed,
            ["feed", "discover"] => Self::Discover,
            ["profile", username] => Self::Profile { username: decode(username) },
            ["profile", username, "settings"] => Self::Settings { username: decode(username) },
            ["profile", username, "friends"] => Self::Friends { username: decode(username) },
            ["post", post_id] => Self::Post { post_id: decode(post_id) },
            ["search"] => Self::Search { query: query_param(query, "q").unwrap_or_default() },
            _ => Self::NotFound { path: path.to_owned() },
        }
    }

    /// Canonical path, including the query string for search.
    #[must_use]
    pub fn path(&self) -> String {
        let enc = |s: &str| urlencoding::encode(s).into_owned();
        match self {
            Self::Landing => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::AboutUs => "/about-us".to_owned(),
            Self::Feed => "/feed".to_owned(),
            Self::Discover => "/feed/discover".to_owned(),
            Self::Profile { username } => format!("/profile/{}", enc(username)),
            Self::Settings { username } => format!("/profile/{}/settings", enc(username)),
            Self::Friends { username } => format!("/profile/{}/friends", enc(username)),
            Self::Post { post_id } => format!("/post/{}", enc(post_id)),
            Self::Search { query } if query.is_empty() => "/search".to_owned(),
            Self::Search { query } => {
                let terms: Vec<String> = query.split_whitespace().map(enc).collect();
                format!("/search?q={}", terms.join("+"))
            }
            Self::NotFound { path } => path.clone(),
        }
    }

    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::AboutUs | Self::NotFound { .. } => Access::Public,
            Self::Landing | Self::Login | Self::Register => Access::PublicOnly,
            Self::Feed
            | Self::Discover
            | Self::Profile { .. }
            | Self::Settings { .. }
            | Self::Friends { .. }
            | Self::Post { .. }
            | Self::Search { .. } => Access::Gated,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
