//! Partial settings updates.
//!
//! Only the fields the user touched are sent. A successful change signs the
//! user out and returns to the landing page so the next login picks up the
//! new avatar and password.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use super::{MutationError, MutationOutcome, Notice, require_token};
use crate::context::SessionContext;
use crate::net::api::ApiClient;
use crate::net::transport::{FileUpload, FormPart, HttpTransport};
use crate::routes::Route;
use crate::storage::CredentialStore;
use crate::validation::{self, FieldError};

pub const PASSWORD_REJECTED: &str = "Error while validating passwords.";
pub const CHANGE_FAILED: &str = "Error changing settings, please try again.";
pub const CHANGED: &str = "Settings changed, please log in again.";
pub const CHANGED_STILL_STORED: &str =
    "Settings changed, but the saved login could not be removed from this device. Please log out.";

/// The touched fields of the settings form. `None` and empty strings mean
/// "leave as is".
#[derive(Clone, Debug, Default)]
pub struct SettingsChange {
    pub private_profile: Option<bool>,
    pub show_birthday: Option<bool>,
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub pfp: Option<FileUpload>,
}

impl SettingsChange {
    fn password_attempted(&self) -> bool {
        !(self.old_password.is_empty() && self.new_password.is_empty() && self.confirm_password.is_empty())
    }

    fn password_accepted(&self) -> bool {
        !self.old_password.is_empty()
            && !self.new_password.is_empty()
            && !self.confirm_password.is_empty()
            && self.new_password != self.old_password
            && self.new_password == self.confirm_password
            && validation::is_valid_password(&self.new_password)
    }

    /// Build the multipart body.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Invalid`] for an unsupported avatar type or a
    /// rejected password with nothing else to send, and
    /// [`MutationError::NothingToSubmit`] when no field was touched.
    pub fn to_parts(&self) -> Result<Vec<FormPart>, MutationError> {
        if let Some(pfp) = &self.pfp {
            validation::validate_image("pfp", pfp)?;
        }

        let mut parts = Vec::new();
        if let Some(flag) = self.private_profile {
            parts.push(FormPart::text("private_profile", flag.to_string()));
        }
        if let Some(flag) = self.show_birthday {
            parts.push(FormPart::text("show_birthday", flag.to_string()));
        }
        if self.password_accepted() {
            parts.push(FormPart::text("old_password", self.old_password.as_str()));
            parts.push(FormPart::text("new_password", self.new_password.as_str()));
            parts.push(FormPart::text("confirm_new_password", self.confirm_password.as_str()));
        }
        if let Some(pfp) = &self.pfp {
            parts.push(FormPart::file("pfp", pfp.clone()));
        }

        if parts.is_empty() {
            if self.password_attempted() {
                return Err(FieldError::new("new_password", PASSWORD_REJECTED).into());
            }
            return Err(MutationError::NothingToSubmit);
        }
        Ok(parts)
    }
}

/// Submit `change` for the signed-in user, then sign out.
///
/// # Errors
///
/// Returns the validation errors of [`SettingsChange::to_parts`], or
/// [`MutationError::Request`] when the server refuses the change.
pub async fn change_settings<S, T>(
    ctx: &mut SessionContext<S>,
    api: &ApiClient<T>,
    change: &SettingsChange,
) -> Result<MutationOutcome, MutationError>
where
    S: CredentialStore,
    T: HttpTransport,
{
    let parts = change.to_parts()?;
    let token = require_token(ctx.bearer_token())?;

    let profile = ctx.profile();
    let target = if profile.profile_slug.is_empty() {
        profile.username.clone()
    } else {
        profile.profile_slug.clone()
    };

    api.update_settings(&token, &target, parts)
        .await
        .map_err(|e| MutationError::request(CHANGE_FAILED, e))?;
    tracing::info!(profile = %target, "settings changed");

    let outcome = MutationOutcome::to(Route::Landing);
    if let Err(e) = ctx.sign_out() {
        tracing::warn!(error = %e, "failed to erase stored credentials after settings change");
        return Ok(outcome.with_notice(Notice::warning(CHANGED_STILL_STORED)));
    }
    Ok(outcome.with_notice(Notice::success(CHANGED)))
}
