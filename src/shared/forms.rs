//! Form structs and validation.
//!
//! Each endpoint that accepts user input has an explicit form struct and a
//! pure validation function returning `Result<(), ValidationErrors>`. The
//! two email-uniqueness rules depend on persisted state; handlers perform
//! the repository lookup and pass the result in as a value, so validation
//! itself never touches the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::course::Course;

/// Allowed profile photo extensions (lowercase).
pub const ALLOWED_PHOTO_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Password length bounds, in characters.
pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 20;

/// Post title length bounds, in characters.
pub const TITLE_MIN: usize = 2;
pub const TITLE_MAX: usize = 140;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending form field.
    pub field: &'static str,
    /// Human-readable message for the form renderer.
    pub message: String,
}

/// Accumulated validation failures for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(())` when no error was recorded, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Registration half of the combined login page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login half of the combined login page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Profile edit submission, assembled from the multipart body. The photo is
/// carried separately as raw bytes; only its client filename participates in
/// validation.
#[derive(Debug, Clone)]
pub struct ProfileEditForm {
    pub username: String,
    pub email: String,
    pub courses: Vec<Course>,
    pub photo_filename: Option<String>,
}

/// Post create/edit form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    pub title: String,
    pub body: String,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Minimal well-formedness check: exactly one `@`, a non-empty local part,
/// and a dot somewhere inside the domain.
pub fn is_valid_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.len() < 3 {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Whether an uploaded filename carries one of the allowed photo extensions.
pub fn has_allowed_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_PHOTO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if is_blank(email) {
        errors.push("email", "email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "invalid email address");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if is_blank(password) {
        errors.push("password", "password is required");
    } else {
        let len = password.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&len) {
            errors.push(
                "password",
                format!("password must be {PASSWORD_MIN} to {PASSWORD_MAX} characters"),
            );
        }
    }
}

/// Validate a registration submission.
///
/// `email_taken` is the result of the repository lookup for the submitted
/// email, performed by the caller.
pub fn validate_registration(
    form: &RegistrationForm,
    email_taken: bool,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(&form.username) {
        errors.push("username", "username is required");
    }
    check_email(&mut errors, &form.email);
    if email_taken {
        errors.push("email", "email is already registered");
    }
    check_password(&mut errors, &form.password);
    if is_blank(&form.confirm_password) {
        errors.push("confirm_password", "password confirmation is required");
    } else if form.confirm_password != form.password {
        errors.push("confirm_password", "passwords do not match");
    }

    errors.into_result()
}

/// Validate a login submission.
pub fn validate_login(form: &LoginForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, &form.email);
    check_password(&mut errors, &form.password);
    errors.into_result()
}

/// Validate a profile edit submission.
///
/// `email_owner` is the id of whichever user currently holds the submitted
/// email, if any; the edit is rejected only when that user is not
/// `acting_user` (editing to one's own unchanged email stays legal).
pub fn validate_profile_edit(
    form: &ProfileEditForm,
    acting_user: Uuid,
    email_owner: Option<Uuid>,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(&form.username) {
        errors.push("username", "username is required");
    }
    check_email(&mut errors, &form.email);
    if let Some(owner) = email_owner {
        if owner != acting_user {
            errors.push("email", "email is already registered");
        }
    }
    if let Some(filename) = &form.photo_filename {
        if !has_allowed_extension(filename) {
            errors.push("foto_perfil", "only jpg and png files are accepted");
        }
    }

    errors.into_result()
}

/// Validate a post create/edit submission.
pub fn validate_post(form: &PostForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(&form.title) {
        errors.push("title", "title is required");
    } else {
        let len = form.title.chars().count();
        if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
            errors.push(
                "title",
                format!("title must be {TITLE_MIN} to {TITLE_MAX} characters"),
            );
        }
    }
    if is_blank(&form.body) {
        errors.push("body", "body is required");
    }

    errors.into_result()
}
