use super::*;

#[test]
fn validation_errors_keep_their_field() {
    let err = MutationError::from(FieldError::new("birth_place", "Not a valid country."));
    assert_eq!(err.field(), Some("birth_place"));
    assert_eq!(err.notice(), Notice::error("Not a valid country."));
    assert_eq!(err.to_string(), "Not a valid country.");
}

#[test]
fn request_errors_show_their_message() {
    let err = MutationError::request(
        "Error while trying to like post, please try again.",
        ApiError::Status { status: 500, message: "HTTP 500".into() },
    );
    assert_eq!(err.field(), None);
    assert_eq!(err.notice().kind, NoticeKind::Error);
    assert_eq!(err.notice().message, "Error while trying to like post, please try again.");
}

#[test]
fn nothing_to_submit_is_informational() {
    assert_eq!(MutationError::NothingToSubmit.notice().kind, NoticeKind::Info);
}

#[test]
fn outcome_builders() {
    assert_eq!(MutationOutcome::reload().navigation, Navigation::Reload);
    let outcome = MutationOutcome::to(Route::Feed).with_notice(Notice::success("ok"));
    assert_eq!(outcome.navigation, Navigation::To(Route::Feed));
    assert_eq!(outcome.notice, Some(Notice::success("ok")));
}

#[test]
fn blank_token_is_unauthenticated() {
    assert_eq!(require_token(Some(String::new())), Err(MutationError::Unauthenticated));
    assert_eq!(require_token(Some("t".into())), Ok("t".into()));
}
