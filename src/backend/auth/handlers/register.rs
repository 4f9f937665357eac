//! Registration handler.
//!
//! Validates the registration half of the login page, hashes the password
//! and inserts the new user with the default photo and no courses. The
//! email-uniqueness rule runs as a repository lookup whose result feeds the
//! pure validator. Matching the original flow, registration redirects home
//! without logging the new user in.

use axum::response::{IntoResponse, Redirect, Response};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::SqlitePool;

use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::AppError;
use crate::shared::forms::{validate_registration, RegistrationForm};

pub(super) async fn handle_register(
    pool: &SqlitePool,
    form: RegistrationForm,
) -> Result<Response, AppError> {
    let email_taken = get_user_by_email(pool, &form.email).await?.is_some();
    validate_registration(&form, email_taken)?;

    let password_hash = hash(&form.password, DEFAULT_COST)?;
    let user = create_user(pool, form.username, form.email, password_hash).await?;

    tracing::info!("user {} registered", user.id);

    Ok(Redirect::to("/").into_response())
}
