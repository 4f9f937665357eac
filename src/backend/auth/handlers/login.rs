//! Login handler.
//!
//! `GET /login` returns the data the (external) renderer needs for the
//! combined login/registration page. `POST /login` dispatches on the tagged
//! form body: a login attempt is verified against the stored bcrypt hash
//! and, on success, establishes the session cookie and redirects to the
//! originally requested page (the `next` parameter) or home.
//!
//! Unknown email and wrong password produce the same generic 401 so the
//! endpoint cannot be used to probe which emails are registered.

use axum::{
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Json, Redirect, Response},
};
use bcrypt::verify;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::register::handle_register;
use crate::backend::auth::handlers::types::{AuthForm, LoginPage, NextQuery};
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::AppError;
use crate::shared::forms::{validate_login, LoginForm};

/// `GET /login` - data for the combined login + registration page.
pub async fn login_page(Query(query): Query<NextQuery>) -> Json<LoginPage> {
    Json(LoginPage { next: query.next })
}

/// `POST /login` - handle either half of the combined form.
pub async fn login_submit(
    State(pool): State<SqlitePool>,
    Query(query): Query<NextQuery>,
    Json(form): Json<AuthForm>,
) -> Result<Response, AppError> {
    match form {
        AuthForm::Login(login) => handle_login(&pool, login, query.next).await,
        AuthForm::Register(registration) => handle_register(&pool, registration).await,
    }
}

async fn handle_login(
    pool: &SqlitePool,
    form: LoginForm,
    next: Option<String>,
) -> Result<Response, AppError> {
    validate_login(&form)?;

    let user = get_user_by_email(pool, &form.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("login attempt for unknown email");
            AppError::InvalidCredentials
        })?;

    // Verify the login form's submitted password against the stored hash.
    let valid = verify(&form.password, &user.password_hash)?;
    if !valid {
        tracing::warn!("invalid password for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = create_token(user.id, user.email.clone(), form.remember_me)?;
    let cookie = session_cookie(&token, form.remember_me);

    tracing::info!("user {} logged in", user.id);

    let target = next
        .filter(|path| path.starts_with('/'))
        .unwrap_or_else(|| "/".to_string());

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(&target),
    )
        .into_response())
}
