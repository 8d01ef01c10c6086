use super::*;
use crate::mutation::Navigation;
use crate::test_helpers::{self, FakeApi};

#[tokio::test]
async fn unknown_sender_gets_a_post() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;

    let outcome = friend_request(&ctx, &api, "bob").await.unwrap();
    assert_eq!(outcome.navigation, Navigation::Stay);
    assert_eq!(outcome.notice, Some(Notice::success("Friend request sent.")));
    assert_eq!(fake.last_request().unwrap().method, Method::Post);
    assert!(fake.has_request("ada", "bob"));
}

#[tokio::test]
async fn pending_sender_gets_a_put() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    assert_eq!(request_method(&ctx, "carol"), Method::Put);

    let outcome = friend_request(&ctx, &api, "carol").await.unwrap();
    assert_eq!(outcome.notice, Some(Notice::success("Friend request accepted.")));
    assert_eq!(fake.last_request().unwrap().method, Method::Put);
    assert!(fake.are_friends("ada", "carol"));
}

#[tokio::test]
async fn server_refusal_is_shown_verbatim() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    friend_request(&ctx, &api, "bob").await.unwrap();

    let err = friend_request(&ctx, &api, "bob").await.unwrap_err();
    assert_eq!(err.notice(), Notice::error("Friend request already sent."));
}

#[tokio::test]
async fn self_request_is_refused_locally() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    let before = fake.request_count();

    assert_eq!(friend_request(&ctx, &api, "ada").await, Err(MutationError::Forbidden(SELF_REQUEST)));
    assert_eq!(fake.request_count(), before);
}

#[tokio::test]
async fn unreachable_server_uses_generic_message() {
    let fake = FakeApi::seeded();
    let api = test_helpers::api(&fake);
    let ctx = test_helpers::signed_in(&fake, "ada", "lovelace1").await;
    fake.set_offline(true);

    let err = friend_request(&ctx, &api, "bob").await.unwrap_err();
    assert_eq!(err.notice().message, REQUEST_FAILED);
}
