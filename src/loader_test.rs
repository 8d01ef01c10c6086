use super::*;
use crate::net::transport::{ApiResponse, Method};
use crate::test_helpers::{self, FakeApi};

#[tokio::test]
async fn missing_token_fails_without_a_request() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    assert_eq!(feed(&api, None).await, Err(LoaderError::Unauthenticated));
    assert_eq!(profile(&api, Some(""), "ada").await, Err(LoaderError::Unauthenticated));
    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn feed_loads_every_post() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let page = feed(&api, Some("tok-ada")).await.unwrap();
    let slugs: Vec<&str> = page.results.iter().map(|p| p.slug()).collect();
    assert_eq!(slugs, vec!["p1", "p2"]);
}

#[tokio::test]
async fn feed_server_error_carries_status() {
    let fake = FakeApi::seeded();
    fake.respond(Method::Get, "/feed/", ApiResponse::new(500, r#"{"detail":"boom"}"#));
    let api = test_helpers::api(&fake);
    let err = feed(&api, Some("tok-ada")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.message(), "boom");
}

#[tokio::test]
async fn profile_resolves_slug_and_lists_own_posts() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let detail = profile(&api, Some("tok-bob"), "ada-l").await.unwrap();
    assert_eq!(detail.summary.username, "ada");
    assert_eq!(detail.posts.len(), 1);
    assert!(detail.pending_request_usernames().contains("carol"));
}

#[tokio::test]
async fn settings_for_other_user_is_forbidden() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let err = settings(&api, Some("tok-bob"), "ada").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn post_detail_includes_comments() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let detail = post(&api, Some("tok-ada"), "p1").await.unwrap();
    assert_eq!(detail.post.post_text, "hello from bob");
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn blank_search_skips_the_request() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    assert!(search(&api, Some("tok-ada"), "  ").await.unwrap().is_empty());
    assert_eq!(fake.request_count(), 0);
    assert_eq!(search(&api, Some("tok-ada"), "carol").await.unwrap().len(), 1);
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let fake = FakeApi::seeded();
    fake.set_offline(true);
    let api = test_helpers::api(&fake);
    let err = discover(&api, Some("tok-ada")).await.unwrap_err();
    assert_eq!(err.status(), None);
    assert!(err.message().starts_with("Could not reach the server"));
}

#[test]
fn failure_policy_per_route() {
    assert_eq!(FailurePolicy::for_route(&Route::Feed), FailurePolicy::ErrorPage);
    assert_eq!(FailurePolicy::for_route(&Route::Discover), FailurePolicy::ErrorPage);
    assert_eq!(FailurePolicy::for_route(&Route::Post { post_id: "p1".into() }), FailurePolicy::ErrorPage);
    assert_eq!(
        FailurePolicy::for_route(&Route::Settings { username: "ada".into() }),
        FailurePolicy::EmptyState
    );
    assert_eq!(FailurePolicy::for_route(&Route::Search { query: String::new() }), FailurePolicy::EmptyState);
}

#[test]
fn api_errors_convert() {
    assert_eq!(LoaderError::from(ApiError::Cancelled), LoaderError::Cancelled);
    assert_eq!(LoaderError::from(ApiError::MissingToken).status(), Some(401));
    let rejected = ApiError::Status { status: 401, message: "Invalid token.".into() };
    assert_eq!(LoaderError::from(rejected), LoaderError::Unauthenticated);
    let forbidden = ApiError::Status { status: 403, message: "Not yours.".into() };
    assert_eq!(LoaderError::from(forbidden).status(), Some(403));
}
