//! Friend requests.

#[cfg(test)]
#[path = "friends_test.rs"]
mod friends_test;

use super::{MutationError, MutationOutcome, Notice, require_token};
use crate::context::SessionContext;
use crate::net::ApiError;
use crate::net::api::ApiClient;
use crate::net::transport::{HttpTransport, Method};
use crate::storage::CredentialStore;

pub const REQUEST_FAILED: &str = "Could not send the friend request, please try again.";
pub const REQUEST_SENT: &str = "Friend request sent.";
pub const SELF_REQUEST: &str = "You cannot send a friend request to yourself.";

/// `PUT` accepts a request `target` already sent us; otherwise `POST` sends one.
#[must_use]
pub fn request_method<S: CredentialStore>(ctx: &SessionContext<S>, target: &str) -> Method {
    if ctx.profile_cache().has_pending_request_from(target) {
        Method::Put
    } else {
        Method::Post
    }
}

/// Send or accept a friend request, surfacing the server's message verbatim.
///
/// # Errors
///
/// Returns [`MutationError::Request`] carrying the server's message when it
/// refuses, or a generic message when it cannot be reached.
pub async fn friend_request<S, T>(
    ctx: &SessionContext<S>,
    api: &ApiClient<T>,
    target: &str,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    if target == ctx.profile().username {
        return Err(MutationError::Forbidden(SELF_REQUEST));
    }
    let token = require_token(ctx.bearer_token())?;
    let method = request_method(ctx, target);
    tracing::debug!(%target, %method, "friend request");

    match api.friend_request(&token, target, method).await {
        Ok(reply) => {
            let message = reply.text().unwrap_or(REQUEST_SENT).to_owned();
            Ok(MutationOutcome::stay(Notice::success(message)))
        }
        Err(ApiError::Status { status, message }) => {
            Err(MutationError::request(message.clone(), ApiError::Status { status, message }))
        }
        Err(e) => Err(MutationError::request(REQUEST_FAILED, e)),
    }
}
