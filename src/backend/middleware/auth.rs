//! Authentication middleware.
//!
//! Guards protected routes. The session token is read from the `session`
//! cookie (or a `Bearer` Authorization header), verified, and resolved to a
//! full `User` row which is attached to the request extensions. Anonymous
//! requests are redirected to `/login?next=<original path>` so the login
//! handler can send the user back where they were going.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::backend::auth::sessions::{verify_token, SESSION_COOKIE};
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::server::state::AppState;

/// The authenticated user for this request, injected by [`require_login`].
///
/// Handlers receive it as an extractor parameter; there is no ambient
/// current-user state.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::warn!("CurrentUser not found in request extensions");
            StatusCode::UNAUTHORIZED
        })
    }
}

/// Route guard for protected handlers.
///
/// On success the request proceeds with `CurrentUser` attached; otherwise
/// the client is redirected to the login page with the originally requested
/// path preserved in the `next` query parameter.
pub async fn require_login(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = token_from_request(&request) else {
        tracing::debug!("unauthenticated request to {}", request.uri().path());
        return login_redirect(request.uri());
    };

    let claims = match verify_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("invalid session token: {e}");
            return login_redirect(request.uri());
        }
    };

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        tracing::warn!("malformed user id in session token");
        return login_redirect(request.uri());
    };

    match get_user_by_id(&state.pool, user_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(CurrentUser(user));
            next.run(request).await
        }
        Ok(None) => {
            tracing::warn!("session token for unknown user {user_id}");
            login_redirect(request.uri())
        }
        Err(e) => {
            tracing::error!("failed to load session user: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Pull the session token out of the cookie, falling back to a Bearer
/// Authorization header for non-browser clients.
fn token_from_request(request: &Request) -> Option<String> {
    if let Some(cookies) = request
        .headers()
        .get(COOKIE)
        .and_then(|h| h.to_str().ok())
    {
        for cookie in cookies.split(';') {
            if let Some(token) = cookie.trim().strip_prefix(SESSION_COOKIE) {
                if let Some(value) = token.strip_prefix('=') {
                    return Some(value.to_string());
                }
            }
        }
    }

    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

fn login_redirect(uri: &Uri) -> Response {
    let original = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Redirect::to(&format!("/login?next={}", encode_component(original))).into_response()
}

/// Percent-encode a path for use as a query parameter value. Slashes stay
/// readable; everything outside the unreserved set is escaped.
fn encode_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
