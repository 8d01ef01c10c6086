//! Likes, new posts, comments, and post deletion.
//!
//! Successful writes reload the current route so the page shows the server's
//! state; there is no optimistic update.

#[cfg(test)]
#[path = "post_test.rs"]
mod post_test;

use super::{MutationError, MutationOutcome, require_token};
use crate::config::StatusStrictness;
use crate::context::SessionContext;
use crate::net::ApiError;
use crate::net::api::ApiClient;
use crate::net::transport::{ApiResponse, FileUpload, FormPart, HttpTransport};
use crate::net::types::Post;
use crate::routes::Route;
use crate::storage::CredentialStore;
use crate::validation;

pub const LIKE_FAILED: &str = "Error while trying to like post, please try again.";
pub const POST_FAILED: &str = "Error while trying to publish post, please try again.";
pub const COMMENT_FAILED: &str = "Error while trying to comment, please try again.";
pub const DELETE_FAILED: &str = "Error while trying to delete post, please try again.";
pub const NOT_AUTHOR: &str = "Only the author can delete this post.";

/// Map a raw write response under the configured strictness. Lenient mode
/// reloads even when the server refused.
fn settle(
    response: Result<ApiResponse, ApiError>,
    strictness: StatusStrictness,
    failure: &str,
) -> Result<MutationOutcome, MutationError> {
    match response {
        Ok(response) if response.is_success() => Ok(MutationOutcome::reload()),
        Ok(response) => match strictness {
            StatusStrictness::Strict => Err(MutationError::request(failure, ApiError::from_response(&response))),
            StatusStrictness::Lenient => {
                tracing::warn!(status = response.status, "ignoring failed write under lenient status handling");
                Ok(MutationOutcome::reload())
            }
        },
        Err(e) => Err(MutationError::request(failure, e)),
    }
}

/// Toggle the user's like on a post. Liking twice restores the original state.
///
/// # Errors
///
/// Returns [`MutationError::Request`] when the toggle fails.
pub async fn like<S, T>(
    ctx: &SessionContext<S>,
    api: &ApiClient<T>,
    post_slug: &str,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    let token = require_token(ctx.bearer_token())?;
    settle(api.toggle_like(&token, post_slug).await, ctx.config().strictness, LIKE_FAILED)
}

/// Publish a post with text, an image, or both.
///
/// # Errors
///
/// Returns [`MutationError::Invalid`] when neither is given or the image type
/// is unsupported, or [`MutationError::Request`] when the upload fails.
pub async fn new_post<S, T>(
    ctx: &SessionContext<S>,
    api: &ApiClient<T>,
    text: &str,
    image: Option<FileUpload>,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    validation::validate_post(text, image.as_ref())?;
    let token = require_token(ctx.bearer_token())?;

    let mut parts = Vec::new();
    if !text.is_empty() {
        parts.push(FormPart::text("post_text", text));
    }
    if let Some(image) = image {
        parts.push(FormPart::file("post_image", image));
    }
    api.create_post(&token, parts)
        .await
        .map_err(|e| MutationError::request(POST_FAILED, e))?;
    Ok(MutationOutcome::reload())
}

/// Comment on the post at `post_endpoint` as the signed-in user.
///
/// # Errors
///
/// Returns [`MutationError::Invalid`] for a blank or overlong comment, or
/// [`MutationError::Request`] when the write fails.
pub async fn comment<S, T>(
    ctx: &SessionContext<S>,
    api: &ApiClient<T>,
    post_endpoint: &str,
    text: &str,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    validation::validate_comment(text)?;
    let token = require_token(ctx.bearer_token())?;
    let parts = vec![
        FormPart::text("comment_text", text),
        FormPart::text("comment_user", ctx.profile().username.as_str()),
    ];
    settle(api.comment(&token, post_endpoint, parts).await, ctx.config().strictness, COMMENT_FAILED)
}

/// Delete one of the user's own posts and return to the feed.
///
/// # Errors
///
/// Returns [`MutationError::Forbidden`] when the user is not the author, or
/// [`MutationError::Request`] when the delete fails.
pub async fn delete_post<S, T>(
    ctx: &SessionContext<S>,
    api: &ApiClient<T>,
    post: &Post,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    let me = ctx.profile().username.as_str();
    let is_author = post.profile.as_ref().is_some_and(|author| !me.is_empty() && author.username == me);
    if !is_author {
        return Err(MutationError::Forbidden(NOT_AUTHOR));
    }
    let token = require_token(ctx.bearer_token())?;
    api.delete_post(&token, &post.endpoint)
        .await
        .map_err(|e| MutationError::request(DELETE_FAILED, e))?;
    tracing::info!(post = post.slug(), "post deleted");
    Ok(MutationOutcome::to(Route::Feed))
}
