//! Shared fixtures for unit tests: an in-memory model of the Helenite API.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Value, json};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::clock::FixedClock;
use crate::config::ClientConfig;
use crate::context::SessionContext;
use crate::net::ApiError;
use crate::net::api::{API_PREFIX, ApiClient};
use crate::net::transport::{ApiRequest, ApiResponse, FormValue, HttpTransport, Method, RequestBody};
use crate::net::types::{
    Comment, FriendRequest, LoginRequest, Post, PostDetail, ProfileDetail, ProfileSummary, SettingsView, UserRef,
};
use crate::storage::{CredentialStore, MemoryStore, StorageError};

pub const ORIGIN: &str = "http://api.test";
pub const NOW: OffsetDateTime = datetime!(2026-10-16 12:00 UTC);

struct FakeUser {
    password: String,
    full_name: String,
    slug: String,
    settings: SettingsView,
    friends: BTreeSet<String>,
    /// Senders of pending requests to this user.
    requests: BTreeSet<String>,
}

#[derive(Default)]
struct FakeState {
    users: BTreeMap<String, FakeUser>,
    posts: Vec<PostDetail>,
    next_post: u32,
    overrides: Vec<(Method, String, ApiResponse)>,
    offline: bool,
    requests: Vec<ApiRequest>,
}

/// Stateful fake backend. Clones share state so a test can keep a handle
/// after moving one into an [`ApiClient`].
#[derive(Clone, Default)]
pub struct FakeApi {
    state: Rc<RefCell<FakeState>>,
}

fn token_for(username: &str) -> String {
    format!("tok-{username}")
}

fn json_response(status: u16, value: &Value) -> ApiResponse {
    ApiResponse::new(status, value.to_string())
}

fn message(status: u16, key: &str, text: &str) -> ApiResponse {
    json_response(status, &json!({ key: text }))
}

impl FakeApi {
    /// Users `ada` (`lovelace1`), `bob` (`babbage22`), and `carol`
    /// (`herschel3`). Carol has a pending request to Ada. Bob wrote `p1`, Ada
    /// wrote `p2`.
    pub fn seeded() -> Self {
        let api = Self::default();
        api.add_user("ada", "lovelace1", "Ada Lovelace", "ada-l");
        api.add_user("bob", "babbage22", "Charles Babbage", "bob");
        api.add_user("carol", "herschel3", "Caroline Herschel", "carol");
        {
            let mut state = api.state.borrow_mut();
            if let Some(ada) = state.users.get_mut("ada") {
                ada.requests.insert("carol".to_owned());
            }
        }
        api.add_post("bob", "hello from bob");
        api.add_post("ada", "notes on the engine");
        api
    }

    pub fn add_user(&self, username: &str, password: &str, full_name: &str, slug: &str) {
        self.state.borrow_mut().users.insert(
            username.to_owned(),
            FakeUser {
                password: password.to_owned(),
                full_name: full_name.to_owned(),
                slug: slug.to_owned(),
                settings: SettingsView {
                    pfp: Some(format!("{ORIGIN}/media/{username}.png")),
                    private_profile: false,
                    show_birthday: true,
                },
                friends: BTreeSet::new(),
                requests: BTreeSet::new(),
            },
        );
    }

    /// Add a post and return its slug (`p1`, `p2`, ...).
    pub fn add_post(&self, author: &str, text: &str) -> String {
        let mut state = self.state.borrow_mut();
        state.next_post += 1;
        let slug = format!("p{}", state.next_post);
        let profile = summary_of(&state, author);
        state.posts.push(PostDetail {
            post: Post {
                profile,
                post_publication_date: "2026-10-16T10:00:00Z".to_owned(),
                endpoint: format!("{API_PREFIX}/profile/post/{slug}/"),
                post_text: text.to_owned(),
                post_image: None,
                likes_count: 0,
                comments_count: 0,
                likes: BTreeSet::new(),
            },
            comments: Vec::new(),
        });
        slug
    }

    /// Answer every request matching `method` and `path` (below `/api/v1`,
    /// query excluded) with `response`.
    pub fn respond(&self, method: Method, path: &str, response: ApiResponse) {
        self.state
            .borrow_mut()
            .overrides
            .push((method, path.to_owned(), response));
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.borrow().requests.last().cloned()
    }

    pub fn likes(&self, slug: &str) -> BTreeSet<String> {
        self.state
            .borrow()
            .posts
            .iter()
            .find(|p| p.post.slug() == slug)
            .map(|p| p.post.likes.clone())
            .unwrap_or_default()
    }

    pub fn settings_of(&self, username: &str) -> SettingsView {
        self.state
            .borrow()
            .users
            .get(username)
            .map(|u| u.settings.clone())
            .unwrap_or_default()
    }

    pub fn password_of(&self, username: &str) -> Option<String> {
        self.state.borrow().users.get(username).map(|u| u.password.clone())
    }

    pub fn post_count(&self) -> usize {
        self.state.borrow().posts.len()
    }

    pub fn comments(&self, slug: &str) -> Vec<Comment> {
        self.state
            .borrow()
            .posts
            .iter()
            .find(|p| p.post.slug() == slug)
            .map(|p| p.comments.clone())
            .unwrap_or_default()
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.state.borrow().users.contains_key(username)
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        self.state
            .borrow()
            .users
            .get(a)
            .is_some_and(|u| u.friends.contains(b))
    }

    pub fn has_request(&self, from: &str, to: &str) -> bool {
        self.state
            .borrow()
            .users
            .get(to)
            .is_some_and(|u| u.requests.contains(from))
    }
}

fn summary_of(state: &FakeState, username: &str) -> Option<ProfileSummary> {
    state.users.get(username).map(|u| ProfileSummary {
        user_pk: None,
        username: username.to_owned(),
        full_name: u.full_name.clone(),
        endpoint: format!("{API_PREFIX}/profile/{}/", u.slug),
        pfp: u.settings.pfp.clone(),
    })
}

fn feed_json(state: &FakeState) -> Value {
    let results: Vec<&Post> = state.posts.iter().map(|p| &p.post).collect();
    json!({ "count": results.len(), "next": null, "previous": null, "results": results })
}

fn caller(state: &FakeState, request: &ApiRequest) -> Option<String> {
    let token = request.bearer.as_deref()?;
    state
        .users
        .keys()
        .find(|name| token_for(name) == token)
        .cloned()
}

/// Profile paths accept either the username or the profile slug.
fn resolve(state: &FakeState, ident: &str) -> Option<String> {
    state
        .users
        .iter()
        .find(|(name, user)| name.as_str() == ident || user.slug == ident)
        .map(|(name, _)| name.clone())
}

fn handle(state: &mut FakeState, request: &ApiRequest, path: &str, query: &str) -> ApiResponse {
    let resolved = path.trim_matches('/').split('/').collect::<Vec<_>>();
    let ident = match resolved.as_slice() {
        ["profile", ident, ..] if *ident != "post" => resolve(state, ident),
        _ => None,
    };
    let segments: Vec<&str> = resolved
        .iter()
        .enumerate()
        .map(|(i, s)| match (&ident, i) {
            (Some(name), 1) => name.as_str(),
            _ => *s,
        })
        .collect();

    match (request.method, segments.as_slice()) {
        (Method::Post, ["login"]) => return login(state, request),
        (Method::Post, ["register"]) => return register(state, request),
        (Method::Post, ["logout"]) => return json_response(200, &json!({})),
        _ => {}
    }

    let Some(me) = caller(state, request) else {
        return message(401, "detail", "Invalid token.");
    };

    match (request.method, segments.as_slice()) {
        (Method::Get, ["feed"] | ["feed", "discover"]) => json_response(200, &feed_json(state)),
        (Method::Post, ["feed"]) => {
            let text = request.body.form_text("post_text").unwrap_or_default().to_owned();
            let has_image = request.body.form_names().contains(&"post_image");
            if text.is_empty() && !has_image {
                return message(400, "error", "Post must have text or an image.");
            }
            state.next_post += 1;
            let slug = format!("p{}", state.next_post);
            let profile = summary_of(state, &me);
            state.posts.push(PostDetail {
                post: Post {
                    profile,
                    post_publication_date: "2026-10-16T12:00:00Z".to_owned(),
                    endpoint: format!("{API_PREFIX}/profile/post/{slug}/"),
                    post_text: text,
                    post_image: has_image.then(|| format!("{ORIGIN}/media/{slug}.png")),
                    likes_count: 0,
                    comments_count: 0,
                    likes: BTreeSet::new(),
                },
                comments: Vec::new(),
            });
            json_response(201, &json!({}))
        }
        (Method::Put, ["feed"]) => {
            let RequestBody::Json(body) = &request.body else {
                return message(400, "error", "Expected JSON.");
            };
            let slug = body.get("post_slug").and_then(Value::as_str).unwrap_or_default();
            let Some(post) = state.posts.iter_mut().find(|p| p.post.slug() == slug) else {
                return message(404, "detail", "Not found.");
            };
            if !post.post.likes.remove(&me) {
                post.post.likes.insert(me);
            }
            post.post.likes_count = post.post.likes.len() as u64;
            json_response(200, &json!({}))
        }
        (Method::Get, ["search"]) => search(state, query),
        (method, ["profile", "post", slug]) => post_endpoint(state, method, slug, &me, request),
        (_, ["profile", ident, ..]) if resolve(state, ident).is_none() => message(404, "detail", "Not found."),
        (Method::Get, ["profile", username]) => profile(state, username),
        (Method::Post, ["profile", username]) => send_request(state, &me, username),
        (Method::Put, ["profile", username]) => accept_request(state, &me, username),
        (Method::Get, ["profile", username, "friends"]) => {
            let Some(user) = state.users.get(*username) else {
                return message(404, "detail", "Not found.");
            };
            let friends: Vec<ProfileSummary> = user.friends.iter().filter_map(|f| summary_of(state, f)).collect();
            json_response(200, &json!({ "results": [{ "friends": friends }] }))
        }
        (Method::Get, ["profile", username, "change-settings"]) => {
            if *username != me {
                return message(403, "detail", "You do not have permission to perform this action.");
            }
            let settings = state.users.get(&me).map(|u| u.settings.clone()).unwrap_or_default();
            json_response(200, &json!(settings))
        }
        (Method::Patch, ["profile", username, "change-settings"]) => change_settings(state, &me, username, request),
        _ => message(404, "detail", "Not found."),
    }
}

fn login(state: &FakeState, request: &ApiRequest) -> ApiResponse {
    let RequestBody::Json(body) = &request.body else {
        return message(400, "error", "Expected JSON.");
    };
    let Ok(credentials) = serde_json::from_value::<LoginRequest>(body.clone()) else {
        return message(400, "error", "Expected JSON.");
    };
    match state.users.get(&credentials.username) {
        Some(user) if user.password == credentials.password => {
            json_response(200, &json!({ "token": token_for(&credentials.username) }))
        }
        _ => message(400, "detail", "Unable to log in with provided credentials."),
    }
}

fn register(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
    let field = |name: &str| request.body.form_text(name).unwrap_or_default().to_owned();
    let username = field("username");
    if username.is_empty() {
        return message(400, "error", "Username is required.");
    }
    if state.users.contains_key(&username) {
        return message(400, "error", "A user with that username already exists.");
    }
    let slug = match field("custom_slug_profile") {
        s if s.is_empty() => username.clone(),
        s => s,
    };
    let full_name = format!("{} {}", field("first_name"), field("last_name")).trim().to_owned();
    state.users.insert(
        username,
        FakeUser {
            password: field("password"),
            full_name,
            slug,
            settings: SettingsView::default(),
            friends: BTreeSet::new(),
            requests: BTreeSet::new(),
        },
    );
    json_response(201, &json!({}))
}

fn search(state: &FakeState, query: &str) -> ApiResponse {
    let raw = query.strip_prefix("q=").unwrap_or_default();
    let terms: Vec<String> = raw
        .split('+')
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
        .collect();
    let hits: Vec<ProfileSummary> = state
        .users
        .iter()
        .filter(|(name, user)| {
            terms
                .iter()
                .any(|t| name.contains(t.as_str()) || user.full_name.to_lowercase().contains(t.as_str()))
        })
        .filter_map(|(name, _)| summary_of(state, name))
        .collect();
    if hits.is_empty() {
        ApiResponse::new(204, Vec::new())
    } else {
        json_response(200, &json!(hits))
    }
}

fn profile(state: &FakeState, username: &str) -> ApiResponse {
    let Some(user) = state.users.get(username) else {
        return message(404, "detail", "Not found.");
    };
    let Some(summary) = summary_of(state, username) else {
        return message(404, "detail", "Not found.");
    };
    let posts: Vec<Post> = state
        .posts
        .iter()
        .filter(|p| p.post.profile.as_ref().is_some_and(|a| a.username == username))
        .map(|p| Post { profile: None, ..p.post.clone() })
        .collect();
    let detail = ProfileDetail {
        summary,
        birthday: user.settings.show_birthday.then(|| "1815-12-10".to_owned()),
        birth_place: Some("GB".to_owned()),
        posts,
        friend_requests: user
            .requests
            .iter()
            .map(|from| FriendRequest {
                request_id: None,
                request_made_by: UserRef { username: from.clone() },
                accepted: false,
            })
            .collect(),
    };
    json_response(200, &json!(detail))
}

fn send_request(state: &mut FakeState, me: &str, target: &str) -> ApiResponse {
    if me == target {
        return message(400, "error", "You cannot befriend yourself.");
    }
    let Some(user) = state.users.get_mut(target) else {
        return message(404, "detail", "Not found.");
    };
    if user.friends.contains(me) {
        return message(400, "error", "You are already friends.");
    }
    if !user.requests.insert(me.to_owned()) {
        return message(400, "error", "Friend request already sent.");
    }
    message(201, "message", "Friend request sent.")
}

fn accept_request(state: &mut FakeState, me: &str, from: &str) -> ApiResponse {
    let removed = state.users.get_mut(me).is_some_and(|u| u.requests.remove(from));
    if !removed {
        return message(400, "error", "No pending friend request.");
    }
    if let Some(user) = state.users.get_mut(me) {
        user.friends.insert(from.to_owned());
    }
    if let Some(user) = state.users.get_mut(from) {
        user.friends.insert(me.to_owned());
    }
    message(200, "message", "Friend request accepted.")
}

fn change_settings(state: &mut FakeState, me: &str, username: &str, request: &ApiRequest) -> ApiResponse {
    if username != me {
        return message(403, "detail", "You do not have permission to perform this action.");
    }
    let Some(user) = state.users.get_mut(me) else {
        return message(404, "detail", "Not found.");
    };
    if let Some(old) = request.body.form_text("old_password") {
        if old != user.password {
            return message(400, "error", "Old password is incorrect.");
        }
        if let Some(new) = request.body.form_text("new_password") {
            user.password = new.to_owned();
        }
    }
    if let Some(flag) = request.body.form_text("private_profile") {
        user.settings.private_profile = flag == "true";
    }
    if let Some(flag) = request.body.form_text("show_birthday") {
        user.settings.show_birthday = flag == "true";
    }
    if let RequestBody::Multipart(parts) = &request.body {
        if let Some(FormValue::File(upload)) = parts.iter().find(|p| p.name == "pfp").map(|p| &p.value) {
            user.settings.pfp = Some(format!("{ORIGIN}/media/{}", upload.file_name));
        }
    }
    json_response(200, &json!({}))
}

fn post_endpoint(state: &mut FakeState, method: Method, slug: &str, me: &str, request: &ApiRequest) -> ApiResponse {
    let Some(index) = state.posts.iter().position(|p| p.post.slug() == slug) else {
        return message(404, "detail", "Not found.");
    };
    match method {
        Method::Get => json_response(200, &json!(state.posts[index])),
        Method::Post => {
            let text = request.body.form_text("comment_text").unwrap_or_default();
            if text.is_empty() {
                return message(400, "error", "Comment cannot be empty.");
            }
            let post = &mut state.posts[index];
            post.comments.push(Comment { comment_text: text.to_owned(), comment_user: me.to_owned() });
            post.post.comments_count = post.comments.len() as u64;
            json_response(201, &json!({}))
        }
        Method::Delete => {
            let author = state.posts[index].post.profile.as_ref().map(|p| p.username.clone());
            if author.as_deref() != Some(me) {
                return message(403, "detail", "You do not have permission to perform this action.");
            }
            state.posts.remove(index);
            ApiResponse::new(204, Vec::new())
        }
        _ => message(405, "detail", "Method not allowed."),
    }
}

#[async_trait::async_trait(?Send)]
impl HttpTransport for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(request.clone());
        if state.offline {
            return Err(ApiError::Transport("connection refused".to_owned()));
        }

        let prefix = format!("{ORIGIN}{API_PREFIX}");
        let rest = request.url.strip_prefix(&prefix).unwrap_or(&request.url);
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));

        if let Some((_, _, response)) = state
            .overrides
            .iter()
            .find(|(method, p, _)| *method == request.method && p == path)
        {
            return Ok(response.clone());
        }
        Ok(handle(&mut state, &request, path, query))
    }
}

pub fn api(fake: &FakeApi) -> ApiClient<FakeApi> {
    ApiClient::new(fake.clone(), ORIGIN)
}

pub fn config() -> ClientConfig {
    ClientConfig { api_url: ORIGIN.to_owned(), ..ClientConfig::default() }
}

pub fn context() -> SessionContext<MemoryStore> {
    context_with(config())
}

pub fn context_with(config: ClientConfig) -> SessionContext<MemoryStore> {
    SessionContext::with_clock(MemoryStore::new(), config, Arc::new(FixedClock(NOW)))
}

pub fn token(username: &str) -> String {
    token_for(username)
}

/// Context after a successful login against `fake`.
pub async fn signed_in(fake: &FakeApi, username: &str, password: &str) -> SessionContext<MemoryStore> {
    signed_in_with(fake, username, password, config()).await
}

pub async fn signed_in_with(
    fake: &FakeApi,
    username: &str,
    password: &str,
    config: ClientConfig,
) -> SessionContext<MemoryStore> {
    let mut ctx = context_with(config);
    let form = crate::validation::LoginForm { username: username.to_owned(), password: password.to_owned() };
    crate::mutation::auth::login(&mut ctx, &api(fake), &form)
        .await
        .expect("seeded login succeeds");
    ctx
}

/// Memory store whose writes can be switched off mid-test.
#[derive(Debug, Default)]
pub struct LockableStore {
    inner: MemoryStore,
    locked: AtomicBool,
}

impl LockableStore {
    pub fn lock(&self) {
        self.locked.store(true, Ordering::SeqCst);
    }

    fn check(&self, key: &str) -> Result<(), StorageError> {
        if self.locked.load(Ordering::SeqCst) {
            return Err(StorageError::Write { key: key.to_owned(), message: "store is read-only".to_owned() });
        }
        Ok(())
    }
}

impl CredentialStore for LockableStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check(key)?;
        self.inner.remove(key)
    }
}

/// Signed-in context over a [`LockableStore`].
pub async fn signed_in_lockable(fake: &FakeApi, username: &str, password: &str) -> SessionContext<LockableStore> {
    let mut ctx = SessionContext::with_clock(LockableStore::default(), config(), Arc::new(FixedClock(NOW)));
    let form = crate::validation::LoginForm { username: username.to_owned(), password: password.to_owned() };
    crate::mutation::auth::login(&mut ctx, &api(fake), &form)
        .await
        .expect("seeded login succeeds");
    ctx
}
