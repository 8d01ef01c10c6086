//! Client-side form validation.
//!
//! Validators are pure and run before any network call. Form-level checks
//! stop at the first failing field and report that field's message.

pub mod countries;


use std::sync::LazyLock;

use regex::Regex;

use crate::net::transport::{FileUpload, FormPart};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_COMMENT_LEN: usize = 500;
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const INVALID_IMAGE: &str = "Please select a valid file type.";
pub const INVALID_COUNTRY: &str = "Not a valid country.";

static NO_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| regex(r"^\S*$"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| regex(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static SLUG: LazyLock<Regex> = LazyLock::new(|| regex(r"^[a-z0-9-]+$"));
static DATE: LazyLock<Regex> = LazyLock::new(|| regex(r"^\d{4}-\d{2}-\d{2}$"));

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static validation pattern")
}

/// A single field that failed validation.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

fn untrimmed(value: &str) -> bool {
    value.trim() != value
}

/// Username: no surrounding or internal whitespace.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    !untrimmed(value) && NO_WHITESPACE.is_match(value)
}

#[must_use]
pub fn is_email(value: &str) -> bool {
    !untrimmed(value) && EMAIL.is_match(value)
}

/// Lowercase letters, digits, and hyphens.
#[must_use]
pub fn is_slug(value: &str) -> bool {
    !untrimmed(value) && SLUG.is_match(value)
}

/// `YYYY-MM-DD` shape only; calendar validity is left to the server.
#[must_use]
pub fn is_date(value: &str) -> bool {
    !untrimmed(value) && DATE.is_match(value)
}

#[must_use]
pub fn is_birthplace(value: &str) -> bool {
    !untrimmed(value) && !value.is_empty() && countries::lookup(value).is_some()
}

/// At least eight characters with at least one letter and one digit.
#[must_use]
pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
        && !untrimmed(value)
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Accepts `jpg`, `jpeg`, and `png` files by extension.
///
/// # Errors
///
/// Returns a [`FieldError`] naming `field` for any other file.
pub fn validate_image(field: &'static str, upload: &FileUpload) -> Result<(), FieldError> {
    let extension = upload
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(FieldError::new(field, INVALID_IMAGE))
    }
}

/// # Errors
///
/// Returns a [`FieldError`] when the text is blank or longer than
/// [`MAX_COMMENT_LEN`] characters.
pub fn validate_comment(text: &str) -> Result<(), FieldError> {
    if text.trim().is_empty() {
        return Err(FieldError::new("comment_text", "Comment cannot be empty."));
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(FieldError::new(
            "comment_text",
            format!("Comment cannot be longer than {MAX_COMMENT_LEN} characters."),
        ));
    }
    Ok(())
}

/// # Errors
///
/// Returns a [`FieldError`] when neither text nor image is given, or the
/// image has an unsupported type.
pub fn validate_post(text: &str, image: Option<&FileUpload>) -> Result<(), FieldError> {
    if let Some(image) = image {
        return validate_image("post_image", image);
    }
    if text.trim().is_empty() {
        return Err(FieldError::new("post_text", "A post needs some text or an image."));
    }
    Ok(())
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.username.trim().is_empty() {
            return Err(FieldError::new("username", "Please enter your username."));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    /// Blank means "use the username".
    pub custom_slug_profile: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: String,
    pub show_birthday: bool,
    pub birth_place: String,
    pub password: String,
    pub confirmation_password: String,
    pub private_profile: bool,
    pub pfp: Option<FileUpload>,
}

impl RegisterForm {
    /// Check every field in form order.
    ///
    /// # Errors
    ///
    /// Returns the first failing field.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.username.is_empty() {
            return Err(FieldError::new("username", "Please choose a username."));
        }
        if !is_valid_name(&self.username) {
            return Err(FieldError::new("username", "Username cannot contain spaces."));
        }
        if !is_email(&self.email) {
            return Err(FieldError::new("email", "Not a valid email address."));
        }
        if !self.custom_slug_profile.is_empty() && !is_slug(&self.custom_slug_profile) {
            return Err(FieldError::new(
                "custom_slug_profile",
                "Profile path may only use lowercase letters, digits and hyphens.",
            ));
        }
        if self.first_name.trim().is_empty() {
            return Err(FieldError::new("first_name", "Please enter your first name."));
        }
        if self.last_name.trim().is_empty() {
            return Err(FieldError::new("last_name", "Please enter your last name."));
        }
        if !is_date(&self.birthday) {
            return Err(FieldError::new("birthday", "Birthday must look like YYYY-MM-DD."));
        }
        if !is_birthplace(&self.birth_place) {
            return Err(FieldError::new("birth_place", INVALID_COUNTRY));
        }
        if !is_valid_password(&self.password) {
            return Err(FieldError::new(
                "password",
                "Password needs at least 8 characters, including a letter and a number.",
            ));
        }
        if self.confirmation_password != self.password {
            return Err(FieldError::new("confirmation_password", "Passwords do not match."));
        }
        if let Some(pfp) = &self.pfp {
            validate_image("pfp", pfp)?;
        }
        Ok(())
    }

    /// Multipart body for `POST /register/`.
    #[must_use]
    pub fn to_parts(&self) -> Vec<FormPart> {
        let mut parts = vec![
            FormPart::text("username", &self.username),
            FormPart::text("email", &self.email),
            FormPart::text("custom_slug_profile", &self.custom_slug_profile),
            FormPart::text("first_name", &self.first_name),
            FormPart::text("last_name", &self.last_name),
            FormPart::text("birthday", &self.birthday),
            FormPart::text("show_birthday", self.show_birthday.to_string()),
            FormPart::text("birth_place", &self.birth_place),
            FormPart::text("password", &self.password),
            FormPart::text("confirmation_password", &self.confirmation_password),
            FormPart::text("private_profile", self.private_profile.to_string()),
        ];
        if let Some(pfp) = &self.pfp {
            parts.push(FormPart::file("pfp", pfp.clone()));
        }
        parts
    }
}
