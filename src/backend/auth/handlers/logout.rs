//! Logout handler.

use axum::{
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};

use crate::backend::auth::sessions::clear_session_cookie;
use crate::backend::middleware::CurrentUser;

/// `GET /sair` - clear the session cookie and go home.
pub async fn logout(CurrentUser(user): CurrentUser) -> Response {
    tracing::info!("user {} logged out", user.id);
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response()
}
