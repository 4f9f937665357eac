//! Request and response types for the auth handlers.

use serde::{Deserialize, Serialize};

use crate::shared::forms::{LoginForm, RegistrationForm};

/// Body of `POST /login`.
///
/// The login page hosts both forms; the `form` tag replaces the original
/// submit-button discrimination.
#[derive(Debug, Deserialize)]
#[serde(tag = "form", rename_all = "lowercase")]
pub enum AuthForm {
    Login(LoginForm),
    Register(RegistrationForm),
}

/// Data for rendering the login page.
#[derive(Debug, Serialize)]
pub struct LoginPage {
    /// Path to return to after a successful login, if the visitor was
    /// bounced off a protected route.
    pub next: Option<String>,
}

/// Query parameters accepted by the login endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    pub next: Option<String>,
}
