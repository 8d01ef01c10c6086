//! Login, registration, and logout.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::{MutationError, MutationOutcome, Navigation, Notice};
use crate::config::StatusStrictness;
use crate::context::{LoginGrant, SessionContext};
use crate::net::ApiError;
use crate::net::api::ApiClient;
use crate::net::transport::HttpTransport;
use crate::net::types::LoginRequest;
use crate::profile::UserProfileSummary;
use crate::routes::Route;
use crate::storage::CredentialStore;
use crate::validation::{LoginForm, RegisterForm};

pub const LOGIN_FAILED: &str = "Could not log in, please try again.";
pub const PROFILE_FETCH_FAILED: &str = "Could not load your profile, please try again.";
pub const REGISTER_FAILED: &str = "Could not create your account, please try again.";
pub const REGISTERED: &str = "Account created! Taking you to the login page...";
pub const LOGOUT_UNCONFIRMED: &str = "The server did not confirm the logout. You have been signed out on this device.";

/// Authenticate, fetch the user's own profile, then persist both together.
///
/// Session state is untouched unless both requests succeed.
///
/// # Errors
///
/// Returns [`MutationError::Invalid`] before any request when the form fails
/// validation, [`MutationError::Authentication`] for rejected credentials,
/// and [`MutationError::Request`] when either request fails otherwise.
pub async fn login<S, T>(
    ctx: &mut SessionContext<S>,
    api: &ApiClient<T>,
    form: &LoginForm,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    form.validate()?;
    let username = form.username.trim().to_owned();

    let credentials = LoginRequest { username: username.clone(), password: form.password.clone() };
    let token = match api.login(&credentials).await {
        Ok(response) => response.token,
        Err(ApiError::Status { message, .. }) => {
            tracing::warn!(%username, "login rejected");
            return Err(MutationError::Authentication(message));
        }
        Err(e) => return Err(MutationError::request(LOGIN_FAILED, e)),
    };

    let profile = api
        .profile(&token, &username)
        .await
        .map_err(|e| MutationError::request(PROFILE_FETCH_FAILED, e))?;

    ctx.establish(LoginGrant {
        token,
        expiration: ctx.fresh_expiry()?,
        profile: UserProfileSummary::from_profile(&profile),
    })?;
    Ok(MutationOutcome::to(Route::Feed))
}

/// Validate every field, then submit the registration.
///
/// # Errors
///
/// Returns [`MutationError::Invalid`] for the first failing field, or
/// [`MutationError::Request`] carrying the server's reason.
pub async fn register<S, T>(
    ctx: &SessionContext<S>,
    api: &ApiClient<T>,
    form: &RegisterForm,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    form.validate()?;
    match api.register(form.to_parts()).await {
        Ok(()) => {
            tracing::info!(username = %form.username, "registered");
            Ok(MutationOutcome {
                navigation: Navigation::ToAfter { route: Route::Login, delay: ctx.config().register_redirect_delay },
                notice: Some(Notice::success(REGISTERED)),
            })
        }
        Err(ApiError::Status { message, status }) => Err(MutationError::request(
            message.clone(),
            ApiError::Status { status, message },
        )),
        Err(e) => Err(MutationError::request(REGISTER_FAILED, e)),
    }
}

/// Notify the server, then clear local state whatever it answered.
///
/// Always navigates to the landing page. Under strict status handling an
/// unconfirmed logout adds a warning.
pub async fn logout<S, T>(ctx: &mut SessionContext<S>, api: &ApiClient<T>) -> MutationOutcome
where
    S: CredentialStore,
    T: HttpTransport,
{
    let token = ctx.bearer_token();
    let confirmed = match api.logout(token.as_deref()).await {
        Ok(response) => response.is_success(),
        Err(e) => {
            tracing::warn!(error = %e, "logout request failed");
            false
        }
    };

    let mut outcome = MutationOutcome::to(Route::Landing);
    if let Err(e) = ctx.sign_out() {
        tracing::warn!(error = %e, "failed to erase stored credentials");
        return outcome.with_notice(MutationError::from(e).notice());
    }
    if !confirmed && ctx.config().strictness == StatusStrictness::Strict {
        outcome = outcome.with_notice(Notice::warning(LOGOUT_UNCONFIRMED));
    }
    outcome
}
