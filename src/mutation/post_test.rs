use super::*;
use crate::config::ClientConfig;
use crate::mutation::Navigation;
use crate::net::transport::Method;
use crate::test_helpers::{self, FakeApi};

fn image(name: &str) -> FileUpload {
    FileUpload { file_name: name.to_owned(), content_type: "image/jpeg".to_owned(), bytes: vec![0xff, 0xd8] }
}

// =============================================================
// like
// =============================================================

#[tokio::test]
async fn liking_twice_restores_the_like_count() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;

    let outcome = like(&ctx, &api, "p1").await.unwrap();
    assert_eq!(outcome.navigation, Navigation::Reload);
    assert!(fake.likes("p1").contains("ada"));

    like(&ctx, &api, "p1").await.unwrap();
    assert!(fake.likes("p1").is_empty());

    let request = fake.last_request().unwrap();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, "http://api.test/api/v1/feed/");
}

#[tokio::test]
async fn strict_like_failure_shows_notice_without_reload() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;

    let err = like(&ctx, &api, "missing").await.unwrap_err();
    assert_eq!(err.notice().message, LIKE_FAILED);
}

#[tokio::test]
async fn lenient_like_failure_still_reloads() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let config = ClientConfig { strictness: StatusStrictness::Lenient, ..test_helpers::config() };
    let ctx = test_helpers::signed_in_with(&fake, "ada", "lovelace1", config).await;

    let outcome = like(&ctx, &api, "missing").await.unwrap();
    assert_eq!(outcome.navigation, Navigation::Reload);
}

#[tokio::test]
async fn like_requires_a_session() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::context();
    assert_eq!(like(&ctx, &api, "p1").await, Err(MutationError::Unauthenticated));
    assert_eq!(fake.request_count(), 0);
}

// =============================================================
// new post
// =============================================================

#[tokio::test]
async fn new_post_sends_only_given_fields() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;

    new_post(&ctx, &api, "", Some(image("cat.jpg"))).await.unwrap();
    assert_eq!(fake.last_request().unwrap().body.form_names(), vec!["post_image"]);

    let outcome = new_post(&ctx, &api, "words", None).await.unwrap();
    assert_eq!(outcome, MutationOutcome::reload());
    assert_eq!(fake.last_request().unwrap().body.form_names(), vec!["post_text"]);
    assert_eq!(fake.post_count(), 4);
}

#[tokio::test]
async fn empty_post_is_rejected_locally() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    let before = fake.request_count();

    let err = new_post(&ctx, &api, "", None).await.unwrap_err();
    assert_eq!(err.field(), Some("post_text"));
    let err = new_post(&ctx, &api, "hi", Some(image("cat.gif"))).await.unwrap_err();
    assert_eq!(err.notice().message, crate::validation::INVALID_IMAGE);
    assert_eq!(fake.request_count(), before);
}

// =============================================================
// comment
// =============================================================

#[tokio::test]
async fn comment_posts_to_the_post_endpoint_as_current_user() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;

    let outcome = comment(&ctx, &api, "/api/v1/profile/post/p1/", "lovely").await.unwrap();
    assert_eq!(outcome.navigation, Navigation::Reload);
    let request = fake.last_request().unwrap();
    assert_eq!(request.url, "http://api.test/api/v1/profile/post/p1/");
    assert_eq!(request.body.form_text("comment_user"), Some("ada"));
    assert_eq!(fake.comments("p1")[0].comment_text, "lovely");
}

#[tokio::test]
async fn blank_comment_is_rejected_locally() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    let err = comment(&ctx, &api, "/api/v1/profile/post/p1/", "  ").await.unwrap_err();
    assert_eq!(err.field(), Some("comment_text"));
}

// =============================================================
// delete
// =============================================================

#[tokio::test]
async fn author_can_delete_and_returns_to_feed() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    let detail = api.post("tok-ada", "p2").await.unwrap();

    let outcome = delete_post(&ctx, &api, &detail.post).await.unwrap();
    assert_eq!(outcome.navigation, Navigation::To(Route::Feed));
    assert_eq!(fake.post_count(), 1);
}

#[tokio::test]
async fn non_author_cannot_delete() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    let detail = api.post("tok-ada", "p1").await.unwrap();
    let before = fake.request_count();

    let err = delete_post(&ctx, &api, &detail.post).await.unwrap_err();
    assert_eq!(err, MutationError::Forbidden(NOT_AUTHOR));
    assert_eq!(fake.request_count(), before);
}

#[tokio::test]
async fn failed_delete_shows_notice() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    let detail = api.post("tok-ada", "p2").await.unwrap();
    fake.set_offline(true);

    let err = delete_post(&ctx, &api, &detail.post).await.unwrap_err();
    assert_eq!(err.notice().message, DELETE_FAILED);
}
